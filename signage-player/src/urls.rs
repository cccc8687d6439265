/// Turn a stored `filePath` into something a renderer can fetch.
///
/// Absolute `http(s)://` URLs pass through. Anything else is served from the
/// server's `/uploads` mount.
pub fn resolve_media_url(base_url: &str, file_path: &str) -> String {
    if file_path.starts_with("http://") || file_path.starts_with("https://") {
        return file_path.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if file_path.starts_with("uploads/") {
        return format!("{base}/{file_path}");
    }
    if file_path.starts_with("/uploads/") {
        return format!("{base}{file_path}");
    }
    format!("{base}/uploads/{}", file_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://signage.local:5000";

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_media_url(BASE, "https://cdn.example.org/a.png"),
            "https://cdn.example.org/a.png"
        );
        assert_eq!(
            resolve_media_url(BASE, "http://intranet/b.mp4"),
            "http://intranet/b.mp4"
        );
    }

    #[test]
    fn upload_paths_are_joined_to_the_base() {
        assert_eq!(
            resolve_media_url(BASE, "uploads/x.png"),
            "http://signage.local:5000/uploads/x.png"
        );
        assert_eq!(
            resolve_media_url(BASE, "/uploads/x.png"),
            "http://signage.local:5000/uploads/x.png"
        );
    }

    #[test]
    fn bare_names_land_under_uploads() {
        assert_eq!(
            resolve_media_url(BASE, "x.png"),
            "http://signage.local:5000/uploads/x.png"
        );
        assert_eq!(
            resolve_media_url(&format!("{BASE}/"), "//nested/x.png"),
            "http://signage.local:5000/uploads/nested/x.png"
        );
    }
}
