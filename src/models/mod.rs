pub mod comment;
pub mod group;
pub mod post;
pub mod user;

use serde::{Deserialize, Serialize};

/// `?limit=&offset=` query of the paginated list endpoints.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Limit/offset page envelope. `next` and `previous` are links relative to the API root.
#[derive(Serialize, Debug)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(path: &str, count: i64, limit: i64, offset: i64, results: Vec<T>) -> Self {
        let following = offset.saturating_add(limit);
        let next = (following < count)
            .then(|| format!("{path}?limit={limit}&offset={following}"));
        let previous = (offset > 0).then(|| {
            let prev = offset.saturating_sub(limit).max(0);
            if prev == 0 {
                format!("{path}?limit={limit}")
            } else {
                format!("{path}?limit={limit}&offset={prev}")
            }
        });

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
