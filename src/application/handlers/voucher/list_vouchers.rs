//! ListVouchersHandler - Query handler for the admin voucher listing.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest};
use crate::domain::voucher::{VoucherListItem, VoucherListQuery, VoucherSort};
use crate::ports::VoucherReader;

/// Raw listing parameters as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListVouchersQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page_index: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListVouchersQuery {
    fn to_list_query(&self) -> VoucherListQuery {
        VoucherListQuery {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort: VoucherSort::parse(self.sort_by.as_deref()),
            page: PageRequest::new(self.page_index, self.per_page),
        }
    }
}

pub struct ListVouchersHandler {
    reader: Arc<dyn VoucherReader>,
}

impl ListVouchersHandler {
    pub fn new(reader: Arc<dyn VoucherReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListVouchersQuery) -> Result<Page<VoucherListItem>, DomainError> {
        self.reader.list(&query.to_list_query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voucher::VoucherSortKey;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingReader {
        queries: Mutex<Vec<VoucherListQuery>>,
    }

    #[async_trait]
    impl VoucherReader for RecordingReader {
        async fn list(&self, query: &VoucherListQuery) -> Result<Page<VoucherListItem>, DomainError> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(Page::new(vec![], 0, query.page))
        }
    }

    #[tokio::test]
    async fn normalizes_query_parameters() {
        let reader = Arc::new(RecordingReader {
            queries: Mutex::new(Vec::new()),
        });
        let handler = ListVouchersHandler::new(reader.clone());

        handler
            .handle(ListVouchersQuery {
                search: Some("  ".to_string()),
                sort_by: Some("-karma".to_string()),
                page_index: Some(2),
                per_page: None,
            })
            .await
            .unwrap();

        let query = reader.queries.lock().unwrap()[0].clone();
        assert_eq!(query.search, None);
        assert_eq!(query.sort.key, VoucherSortKey::Karma);
        assert!(query.sort.descending);
        assert_eq!(query.page.page(), 2);
        assert_eq!(query.page.per_page(), 10);
    }
}
