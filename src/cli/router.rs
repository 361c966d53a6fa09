use anyhow::{Result, bail};
use std::fmt::Display;
use std::str::FromStr;

/// The two screens of the client and the paths that select them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Investors,
    /// `/investors/{investor_id}`
    Commitments { investor_id: String },
}

impl Route {
    pub fn commitments(investor_id: impl Into<String>) -> Self {
        Route::Commitments {
            investor_id: investor_id.into(),
        }
    }

    pub fn parse(path: &str) -> Result<Self> {
        // Query strings and fragments never select a view.
        let trimmed = path.trim();
        let trimmed = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
        let segments: Vec<&str> = trimmed
            .strip_prefix('/')
            .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
            .map(|rest| {
                if rest.is_empty() {
                    Vec::new()
                } else {
                    rest.split('/').collect()
                }
            })
            .unwrap_or_else(|| vec![""]);

        match segments.as_slice() {
            [] => Ok(Route::Investors),
            ["investors", id] if !id.is_empty() => Ok(Route::commitments(*id)),
            _ => bail!("No view for path: {path}"),
        }
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Investors => write!(f, "/"),
            Route::Commitments { investor_id } => write!(f, "/investors/{investor_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Investors);
        assert_eq!(
            Route::parse("/investors/1").unwrap(),
            Route::commitments("1")
        );
        assert_eq!(
            Route::parse("/investors/abc/").unwrap(),
            Route::commitments("abc")
        );
    }

    #[test]
    fn test_parse_ignores_query_and_fragment() {
        assert_eq!(
            Route::parse("/investors/1?x=2").unwrap(),
            Route::commitments("1")
        );
        assert_eq!(
            Route::parse("/investors/1/#totals").unwrap(),
            Route::commitments("1")
        );
        assert_eq!(Route::parse("/?page=2").unwrap(), Route::Investors);
        assert!(Route::parse("/investors/?id=1").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        for path in [
            "",
            "investors/1",
            "/investors",
            "/investors/",
            "/investors/1/commitments",
            "/funds/1",
        ] {
            let err = Route::parse(path).unwrap_err();
            assert!(
                err.to_string().contains("No view for path"),
                "unexpected error for {path:?}: {err}"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for route in [Route::Investors, Route::commitments("42")] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
        assert_eq!(Route::commitments("42").to_string(), "/investors/42");
    }
}
