//! Pair fetching: one POST to the generator service per submit.

use gloo_net::http::Request;

use crate::error::FetchError;
use crate::pairs::{PairList, PairRequest, WordPair};

/// Send `req` to `endpoint` and return the pairs exactly as the service sent them.
/// There is no retry; any failure surfaces as a single [`FetchError`].
pub async fn fetch_pairs(endpoint: &str, req: &PairRequest) -> Result<Vec<WordPair>, FetchError> {
    log::info!(
        "requesting {} {}/{} pairs at level {}",
        req.n,
        req.l1_language,
        req.l2_language,
        req.reading_level
    );

    let resp = Request::post(endpoint)
        .json(req)
        .map_err(|e| FetchError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    check_status(resp.status())?;

    let list = resp
        .json::<PairList>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    log::info!("received {} pairs", list.pairs.len());
    Ok(list.pairs)
}

fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Status { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_2xx_is_success() {
        assert!(check_status(200).is_ok());
        assert!(check_status(204).is_ok());
        assert!(matches!(check_status(400), Err(FetchError::Status { status: 400 })));
        assert!(matches!(check_status(500), Err(FetchError::Status { status: 500 })));
        assert!(check_status(302).is_err());
    }
}
