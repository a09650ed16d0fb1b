//! Status code classification by hundreds band. 1xx and 3xx codes are
//! neither success nor error for these predicates.

use crate::error::Error;
use crate::http::Response;

pub fn is_success(code: u16) -> bool {
    code / 100 == 2
}

pub fn is_client_error(code: u16) -> bool {
    code / 100 == 4
}

pub fn is_server_error(code: u16) -> bool {
    code / 100 == 5
}

/// `Err(Error::Status)` unless the response code is 2xx.
pub fn raise_for_status(response: &Response) -> Result<(), Error> {
    let code = response.status().code;
    if !is_success(code) {
        return Err(Error::Status { code });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_band() {
        for code in [200, 202, 204, 299] {
            assert!(is_success(code), "{code}");
        }
        for code in [100, 199, 300, 311, 400, 404, 500, 503] {
            assert!(!is_success(code), "{code}");
        }
    }

    #[test]
    fn client_error_band() {
        for code in [400, 404, 455, 499] {
            assert!(is_client_error(code), "{code}");
        }
        for code in [200, 204, 300, 311, 399, 500, 503] {
            assert!(!is_client_error(code), "{code}");
        }
    }

    #[test]
    fn server_error_band() {
        for code in [500, 503, 599] {
            assert!(is_server_error(code), "{code}");
        }
        for code in [200, 204, 300, 311, 400, 403, 499, 600] {
            assert!(!is_server_error(code), "{code}");
        }
    }

    #[test]
    fn redirects_are_unclassified() {
        for code in 300..400 {
            assert!(!is_success(code) && !is_client_error(code) && !is_server_error(code));
        }
    }
}
