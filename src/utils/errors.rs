/// Strip technical prefixes from an error string before showing it to a user.
///
/// Handles database errors such as
/// `"error returned from database: 1062 (23000): Duplicate entry"` and
/// backend client errors such as `"Bad Request: Insufficient balance"`.
pub fn extract_clean_error(error_msg: &str) -> String {
    const API_PREFIXES: [&str; 4] = ["Bad Request: ", "Forbidden: ", "Not Found: ", "Unauthorized: "];

    if error_msg.contains("error returned from database:") {
        if let Some(last_colon) = error_msg.rfind(": ") {
            return error_msg[last_colon + 2..].trim().to_string();
        }
    }

    for prefix in API_PREFIXES {
        if let Some(rest) = error_msg.strip_prefix(prefix) {
            if !rest.trim().is_empty() {
                return rest.trim().to_string();
            }
        }
    }

    error_msg.trim().to_string()
}
