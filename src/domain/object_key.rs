//! Pure helpers over S3 object keys: which uploads get a thumbnail, and where it goes.

const DELIMITER: char = '/';
const THUMBNAIL_SEGMENT: &str = "thumbnail";
const ACCEPTED_EXTENSIONS: [&str; 2] = [".jpg", ".jpeg"];

/// Returns the extension of the key's final segment, including the leading dot.
///
/// A trailing dot means there is no extension. Case is left untouched.
pub fn extension(key: &str) -> Option<&str> {
    let object_name = object_name(key);
    let dot = object_name.rfind('.')?;
    let ext = &object_name[dot..];
    if ext.len() > 1 {
        Some(ext)
    } else {
        None
    }
}

/// Whether the key names an image we generate thumbnails for.
///
/// Matching is case-sensitive: `photo.JPG` is rejected.
pub fn is_accepted(key: &str) -> bool {
    extension(key).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
}

/// Maps a source key to the key its thumbnail is stored under.
///
/// Keys at the root or one directory deep land under the shared top-level
/// `thumbnail/` prefix. Deeper keys keep every directory above the immediate
/// parent, and the parent is replaced by `thumbnail`. Empty directory
/// segments (leading or doubled delimiters) do not count as directories.
pub fn thumbnail_key(key: &str) -> String {
    let object_name = object_name(key);
    let segments: Vec<&str> = key[..key.len() - object_name.len()]
        .split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.len() {
        0 | 1 => format!("{THUMBNAIL_SEGMENT}{DELIMITER}{object_name}"),
        depth => {
            let ancestors = segments[..depth - 1].join("/");
            format!("{ancestors}{DELIMITER}{THUMBNAIL_SEGMENT}{DELIMITER}{object_name}")
        }
    }
}

fn object_name(key: &str) -> &str {
    match key.rfind(DELIMITER) {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}
