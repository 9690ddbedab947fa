//! API endpoint URL builders

use urlencoding::encode;

/// Build the category listing URL for a game
pub fn categories_url(base_url: &str, game_id: &str) -> String {
    format!("{}/games/{}/categories", base_url, encode(game_id))
}

/// Build a run listing URL
///
/// Only verified runs are requested, oldest first, `page_size` at a time.
pub fn runs_url(
    base_url: &str,
    game_id: &str,
    category_id: Option<&str>,
    page_size: u32,
    offset: usize,
) -> String {
    let mut url = format!(
        "{}/runs?game={}&status=verified&orderby=date&max={}&offset={}",
        base_url,
        encode(game_id),
        page_size,
        offset
    );

    if let Some(category) = category_id {
        url.push_str(&format!("&category={}", encode(category)));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_url() {
        let url = categories_url("https://www.speedrun.com/api/v1", "o1y9wo6q");
        assert_eq!(url, "https://www.speedrun.com/api/v1/games/o1y9wo6q/categories");
    }

    #[test]
    fn test_runs_url_without_category() {
        let url = runs_url("http://localhost:8000", "o1y9wo6q", None, 200, 0);
        assert_eq!(
            url,
            "http://localhost:8000/runs?game=o1y9wo6q&status=verified&orderby=date&max=200&offset=0"
        );
    }

    #[test]
    fn test_runs_url_with_category() {
        let url = runs_url("http://localhost:8000", "o1y9wo6q", Some("wkpoo02r"), 50, 400);
        assert_eq!(
            url,
            "http://localhost:8000/runs?game=o1y9wo6q&status=verified&orderby=date&max=50&offset=400&category=wkpoo02r"
        );
    }

    #[test]
    fn test_ids_are_encoded() {
        let url = categories_url("http://localhost:8000", "a b");
        assert_eq!(url, "http://localhost:8000/games/a%20b/categories");
    }
}
