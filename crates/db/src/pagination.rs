use serde::Deserialize;

#[macro_export]
macro_rules! paginate {
    ( $query:expr, $column:path, $pagination:expr ) => {{
        let query = $query;
        match $pagination {
            Pagination::MaxId(id, limit) => query.filter($column.gt(id)).limit(limit.into()),
            Pagination::MinId(id, limit) => query.filter($column.lt(id)).limit(limit.into()),
            Pagination::None(limit) => query.limit(limit.into()),
        }
    }};
}

#[derive(Deserialize)]
pub struct PaginationQuery {
    pub max_id: Option<String>,
    pub min_id: Option<String>,
    pub limit: Option<i32>,
}

pub enum Pagination {
    MaxId(String, i32),
    MinId(String, i32),
    None(i32),
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        let limit = match query.limit {
            None => 20,
            Some(limit) if limit < 40 => limit,
            _ => 40,
        };

        if let Some(max_id) = query.max_id {
            Pagination::MaxId(max_id, limit)
        } else if let Some(min_id) = query.min_id {
            Pagination::MinId(min_id, limit)
        } else {
            Pagination::None(limit)
        }
    }
}
