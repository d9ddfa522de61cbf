//! Normalisation of the URL typed by the user.

use thiserror::Error;

const DEFAULT_SCHEME: &str = "https://";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("please enter a website URL")]
    InputMissing,
}

/// Trim the input and make sure it carries an `http://` or `https://` scheme.
///
/// Nothing beyond the prefix is validated; reachability is the fetcher's concern.
pub fn normalize_url(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::InputMissing);
    }

    if has_http_scheme(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{trimmed}"))
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
