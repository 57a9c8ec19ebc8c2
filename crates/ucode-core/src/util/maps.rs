use serde_json::{Value, json};

use ucode_api::Object;

/// Build a `$group`-style projection for dotted field paths.
///
/// `"author.name"` becomes `"author_name": {"$first": "$author.name"}`;
/// paths without a dot are skipped.
pub fn project_query<S: AsRef<str>>(paths: &[S]) -> Object {
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| path.contains('.'))
        .map(|path| (path.replace('.', "_"), json!({ "$first": format!("${path}") })))
        .collect()
}

/// Copy every entry of `src` into `dest`, overwriting existing keys.
pub fn copy_map(dest: &mut Object, src: &Object) {
    dest.extend(src.iter().map(|(k, v): (&String, &Value)| (k.clone(), v.clone())));
}
