//! Folding matched paths into one template namespace.
//!
//! The builder consumes the walker's ordered path sequence and parses
//! each file into the namespace, one unit per path. The first path
//! anchors a fresh namespace when the caller did not supply one; after
//! that the root name is settled and every differently-named path becomes
//! an associated unit.

use tracing::debug;

use crate::engine::{Engine, Namespace};
use crate::error::Error;
use crate::store::FileStore;

/// Fold `paths`, in order, into a namespace.
///
/// `existing` extends a previously built (or pre-anchored) namespace;
/// `None` anchors a new one at the first path. Fails with
/// [`Error::NoFilesMatched`] on an empty sequence before any read
/// happens. A read or parse failure aborts the whole build; since the
/// namespace is moved into the call, no partially-updated handle survives
/// an error.
pub fn build<E, S>(
    existing: Option<Namespace<E>>,
    store: &S,
    paths: &[String],
) -> Result<Namespace<E>, Error>
where
    E: Engine,
    S: FileStore + ?Sized,
{
    let Some(first) = paths.first() else {
        return Err(Error::NoFilesMatched);
    };

    // The first matched file fixes the namespace identity when the
    // caller supplied none.
    let mut namespace = match existing {
        Some(namespace) => namespace,
        None => Namespace::anchored(first.clone()),
    };

    for path in paths {
        let raw = store.read(path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;

        let text = String::from_utf8(raw).map_err(|source| Error::Parse {
            path: path.clone(),
            source: Box::new(source),
        })?;

        // Same-named path re-parses the root unit instead of shadowing it
        namespace
            .parse_into(path, &text)
            .map_err(|source| Error::Parse {
                path: path.clone(),
                source: Box::new(source),
            })?;
    }

    debug!(
        root = namespace.root_name(),
        units = paths.len(),
        "namespace built"
    );
    Ok(namespace)
}
