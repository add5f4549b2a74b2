use log::Level;

/// Marker left in the contact endpoint until the form service is configured.
pub const FORM_ENDPOINT_PLACEHOLDER: &str = "YOUR_FORM_ID";

#[cfg(debug_assertions)]
pub fn contact_endpoint() -> &'static str {
    "http://localhost:3001/api/contact"  // Local mock when running with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn contact_endpoint() -> &'static str {
    "https://formspree.io/f/YOUR_FORM_ID"
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// True while the endpoint still carries the unconfigured placeholder.
pub fn is_placeholder_endpoint(endpoint: &str) -> bool {
    endpoint.contains(FORM_ENDPOINT_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_detected_anywhere_in_endpoint() {
        assert!(is_placeholder_endpoint("https://formspree.io/f/YOUR_FORM_ID"));
        assert!(is_placeholder_endpoint("YOUR_FORM_ID"));
        assert!(!is_placeholder_endpoint("https://formspree.io/f/xbjnqwer"));
        assert!(!is_placeholder_endpoint(""));
    }
}
