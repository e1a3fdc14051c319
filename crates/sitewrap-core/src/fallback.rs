//! Offline fallback page.
//!
//! A static right-to-left document served straight into the surface when the
//! device is offline at launch or the top-level page fails to load. It has no
//! base URL and pulls in no external resources.

/// Page heading ("Oops!").
pub const HEADING: &str = "אופס!";

/// First guidance line ("No internet connection").
pub const NO_CONNECTION_LINE: &str = "אין חיבור לאינטרנט";

/// Second guidance line ("Please check your settings and try again").
pub const CHECK_SETTINGS_LINE: &str = "אנא בדוק את ההגדרות ונסה שוב";

/// Retry button label ("Try again").
pub const RETRY_LABEL: &str = "נסה שוב";

/// Script run by the retry button. Reloads the fallback document itself.
pub const RETRY_ACTION: &str = "window.location.reload()";

const STYLES: &str = "body { font-family: Arial, sans-serif; text-align: center; padding: 50px 20px; background: #fff; margin: 0; }\
h1 { color: #00A86B; font-size: 48px; margin-bottom: 10px; }\
p { color: #363942; font-size: 18px; margin: 10px 0; }\
.btn { background: #00A86B; color: white; border: none; padding: 15px 40px; font-size: 18px; border-radius: 8px; margin-top: 30px; cursor: pointer; }\
.btn:active { background: #008556; }";

/// Renders the fallback document.
pub fn render() -> String {
    format!(
        "<!DOCTYPE html>\
<html dir='rtl'>\
<head>\
<meta charset='utf-8'>\
<meta name='viewport' content='width=device-width, initial-scale=1'>\
<style>{STYLES}</style>\
</head>\
<body>\
<h1>{HEADING}</h1>\
<p>{NO_CONNECTION_LINE}</p>\
<p>{CHECK_SETTINGS_LINE}</p>\
<button class='btn' onclick='{RETRY_ACTION}'>{RETRY_LABEL}</button>\
</body>\
</html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_rtl_and_self_contained() {
        let html = render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html dir='rtl'>"));
        assert!(html.contains("<meta charset='utf-8'>"));
        assert!(!html.contains("src="));
        assert!(!html.contains("href="));
    }

    #[test]
    fn document_has_heading_guidance_and_retry() {
        let html = render();
        assert!(html.contains(&format!("<h1>{HEADING}</h1>")));
        assert!(html.contains(&format!("<p>{NO_CONNECTION_LINE}</p>")));
        assert!(html.contains(&format!("<p>{CHECK_SETTINGS_LINE}</p>")));
        assert!(html.contains("onclick='window.location.reload()'"));
        assert!(html.contains(RETRY_LABEL));
    }
}
