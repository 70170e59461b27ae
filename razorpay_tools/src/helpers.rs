use serde_json::Value;

/// Razorpay reports failures as `{"error": {"code": "...", "description": "..."}}`. Extract the human-readable
/// description, falling back to the raw body when it is not in that shape.
pub fn razorpay_error_message(body: &str) -> String {
    let description = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        let error = &v["error"];
        match (error["code"].as_str(), error["description"].as_str()) {
            (Some(code), Some(description)) => Some(format!("{code}: {description}")),
            (None, Some(description)) => Some(description.to_string()),
            _ => None,
        }
    });
    description.unwrap_or_else(|| body.trim().to_string())
}
