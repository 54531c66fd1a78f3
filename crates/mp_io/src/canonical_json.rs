//! Canonical JSON + atomic file writes.
//! - Objects: keys sorted by UTF-8 byte order; arrays keep caller order.
//! - Output is compact with no trailing newline.
//! - `write_atomic`: temp file in the destination dir, fsync, rename, fsync(dir)
//!   on Unix. If rename fails (cross-device), write the target directly.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::IoResult;

/// Canonical bytes of an already-parsed value.
pub fn to_canonical_json_bytes(v: &Value) -> IoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(1024);
    write_value(v, &mut out)?;
    Ok(out)
}

/// Canonical bytes of any serializable value.
pub fn canonical_bytes<T: Serialize>(value: &T) -> IoResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    to_canonical_json_bytes(&v)
}

fn write_value(v: &Value, out: &mut Vec<u8>) -> IoResult<()> {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => serde_json::to_writer(&mut *out, s)?,
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(elem, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, k)?;
                out.push(b':');
                write_value(&map[k.as_str()], out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

/// Write `bytes` to `path` atomically (with cross-device fallback).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = unique_tmp_path(path);
    let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    if let Err(e) = tf.write_all(bytes).and_then(|_| tf.sync_all()) {
        drop(tf);
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    drop(tf);

    if fs::rename(&tmp, path).is_err() {
        let direct = (|| -> io::Result<()> {
            let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
            f.write_all(bytes)?;
            f.sync_all()
        })();
        let _ = fs::remove_file(&tmp);
        direct?;
    }
    let _ = fsync_dir(parent);
    Ok(())
}

/// "<filename>.<pid>.<counter>.tmp" next to `target`.
fn unique_tmp_path(target: &Path) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let fname = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let tmp_name = format!(".{fname}.{}.{n}.tmp", std::process::id());
    match target.parent() {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    OpenOptions::new().read(true).open(dir)?.sync_all()
}

#[cfg(not(unix))]
#[inline]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_are_sorted_arrays_preserved() {
        let v = json!({
            "b": 1,
            "a": { "y": 1, "x": 2 },
            "arr": [ {"k":2,"j":1}, 3, "z" ]
        });
        let s = String::from_utf8(to_canonical_json_bytes(&v).unwrap()).unwrap();
        assert_eq!(s, r#"{"a":{"x":2,"y":1},"arr":[{"j":1,"k":2},3,"z"],"b":1}"#);
    }

    #[test]
    fn strings_escape_like_serde_json() {
        let s = "кв. \"5\"\n\\\u{1}";
        let ours = String::from_utf8(to_canonical_json_bytes(&json!(s)).unwrap()).unwrap();
        assert_eq!(ours, serde_json::to_string(s).unwrap());

        let keyed = String::from_utf8(to_canonical_json_bytes(&json!({ "к\"в": "\t" })).unwrap()).unwrap();
        assert_eq!(keyed, r#"{"к\"в":"\t"}"#);
    }

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("Протокол_1.docx");
        write_atomic(&target, b"first").unwrap();
        write_atomic(&target, b"second").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");
        let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
