//! Path helpers
//!
//! Product names come straight from the sheet ("Coca-Cola Sin Azúcar 400ml PET x12"), so
//! names are folded into the lowercase hyphenated form the site uses for its image files.
//! Containment checks resolve `..` and symlinks before comparing.

use std::path::{Component, Path, PathBuf};

use normpath::PathExt;

/// Accented Latin letters folded to their base letter
const FOLDED: &[(char, char)] = &[
    ('á', 'a'),
    ('à', 'a'),
    ('ä', 'a'),
    ('â', 'a'),
    ('é', 'e'),
    ('è', 'e'),
    ('ë', 'e'),
    ('ê', 'e'),
    ('í', 'i'),
    ('ì', 'i'),
    ('ï', 'i'),
    ('î', 'i'),
    ('ó', 'o'),
    ('ò', 'o'),
    ('ö', 'o'),
    ('ô', 'o'),
    ('ú', 'u'),
    ('ù', 'u'),
    ('ü', 'u'),
    ('û', 'u'),
    ('ñ', 'n'),
    ('ç', 'c'),
];

/// Make a product name safe for use as a file stem.
///
/// Lowercases, folds common accents, replaces every other non-alphanumeric character with
/// a hyphen, collapses consecutive hyphens and trims them from both ends.
/// Returns "unknown" if the result is empty.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Brisa Lima Limón 600ml x6"), "brisa-lima-limon-600ml-x6");
/// assert_eq!(slugify("***"), "unknown");
/// ```
pub fn slugify(name: &str) -> String {
    let key: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            FOLDED
                .iter()
                .find(|(accented, _)| *accented == c)
                .map_or(c, |(_, base)| *base)
        })
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let key = key
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if key.is_empty() {
        "unknown".to_string()
    } else {
        key
    }
}

/// Lowercased extension of a file name, if any
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether `path` is `base` or lies below it, once both are resolved
pub fn is_within(path: &Path, base: &Path) -> bool {
    resolve(path).starts_with(resolve(base))
}

/// Resolve `path` even when its tail does not exist yet.
///
/// The longest existing ancestor is normalized on disk; the missing components are then
/// applied lexically, with `..` popping and `.` ignored.
pub fn resolve(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();

    loop {
        if let Ok(normalized) = existing.normalize() {
            return apply_components(normalized.into_path_buf(), missing.iter().rev().copied());
        }
        match (existing.parent(), existing.components().next_back()) {
            (Some(parent), Some(last)) => {
                missing.push(last);
                existing = parent;
            }
            _ => return apply_components(PathBuf::new(), path.components()),
        }
    }
}

fn apply_components<'a>(
    mut resolved: PathBuf,
    components: impl Iterator<Item = Component<'a>>,
) -> PathBuf {
    for component in components {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}
