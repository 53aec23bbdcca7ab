use sea_orm::DatabaseConnection;

mod access;
mod cart;
mod ingredients;
mod recipes;
mod relations;
mod subscriptions;
mod tags;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    /// Missing or zero values fall back to the first page and the default
    /// size; the size is capped at [`MAX_PAGE_SIZE`].
    pub fn new(number: Option<u64>, size: Option<u64>) -> Self {
        Self {
            number: number.filter(|n| *n > 0).unwrap_or(1),
            size: size
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }

    /// Zero-based page index for the paginator. Pages whose row offset does
    /// not fit an SQL integer are rejected.
    pub(crate) fn index(&self) -> crate::ResultEngine<u64> {
        match self.number.checked_mul(self.size) {
            Some(end) if end <= i64::MAX as u64 => Ok(self.number - 1),
            _ => Err(crate::EngineError::InvalidInput(format!(
                "page {} is out of range",
                self.number
            ))),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total number of matching items.
#[derive(Clone, Debug, PartialEq)]
pub struct Paginated<T> {
    pub count: u64,
    pub page: Page,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn next_page(&self) -> Option<u64> {
        (self.page.number.saturating_mul(self.page.size) < self.count)
            .then_some(self.page.number + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.page.number > 1).then_some(self.page.number - 1)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> crate::ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
