//! Resolution of `hash` references.
//!
//! Decoding a `hash` field yields only the digest it holds. A resolver maps a
//! digest back to the self-described bytes of the referenced record, which are
//! checked against the digest and the field's declared schema before being
//! decoded and substituted into the parent record.
//!
//! A resolver that returns bytes which do not hash to the requested digest, or
//! which embed a different schema, is reporting corrupt data. Neither case is
//! retried or reconciled.

use crate::{decode_self_described, decode_with, join_path, ResolveError};
use core::{convert::Infallible, future::Future, pin::Pin, time::Duration};
use packlog_types::{Digest, Field, FieldType, Record, Schema, Value};


/// Asynchronous lookup of records by content digest.
pub trait Resolve {
    /// An error type describing any cases that might occur during lookup.
    type Error: core::fmt::Debug + core::fmt::Display;
    /// The future type returned from the `resolve` method.
    ///
    /// In-memory implementations may use `std::future::Ready`; anything that
    /// needs to call `async` functions with anonymised return types will need
    /// to box.
    type Future: Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Unpin;

    /// Look up the self-described bytes whose digest is `digest`.
    ///
    /// Returns `Ok(None)` if no such entry is known.
    fn resolve(&self, digest: Digest) -> Self::Future;
}

/// Synchronous lookup of records by content digest.
pub trait ResolveSync {
    /// An error type describing any cases that might occur during lookup.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Look up the self-described bytes whose digest is `digest`.
    ///
    /// Returns `Ok(None)` if no such entry is known.
    fn resolve(&self, digest: &Digest) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// A resolver that knows no records.
///
/// Use it to decode where no resolver is available: every reference is
/// reported as [`ResolveError::Unresolved`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Unresolvable;

/// Adapts a lookup function `Fn(&Digest) -> Option<Vec<u8>>` into a resolver.
#[derive(Clone, Copy, Debug)]
pub struct FnResolver<F>(pub F);

impl Resolve for Unresolvable {
    type Error = Infallible;
    type Future = core::future::Ready<Result<Option<Vec<u8>>, Infallible>>;

    fn resolve(&self, _digest: Digest) -> Self::Future {
        core::future::ready(Ok(None))
    }
}

impl ResolveSync for Unresolvable {
    type Error = Infallible;

    fn resolve(&self, _digest: &Digest) -> Result<Option<Vec<u8>>, Infallible> {
        Ok(None)
    }
}

impl<F> ResolveSync for FnResolver<F>
where
    F: Fn(&Digest) -> Option<Vec<u8>>,
{
    type Error = Infallible;

    fn resolve(&self, digest: &Digest) -> Result<Option<Vec<u8>>, Infallible> {
        Ok((self.0)(digest))
    }
}

impl<F> Resolve for FnResolver<F>
where
    F: Fn(&Digest) -> Option<Vec<u8>>,
{
    type Error = Infallible;
    type Future = core::future::Ready<Result<Option<Vec<u8>>, Infallible>>;

    fn resolve(&self, digest: Digest) -> Self::Future {
        core::future::ready(Ok((self.0)(&digest)))
    }
}

impl<R: ResolveSync> ResolveSync for &R {
    type Error = R::Error;

    fn resolve(&self, digest: &Digest) -> Result<Option<Vec<u8>>, Self::Error> {
        (**self).resolve(digest)
    }
}

/// Decode a record and resolve every `hash` reference it holds.
///
/// If `schema` is `None` the record must be self-described. Each lookup is
/// bounded by `timeout` when one is given; a lookup that does not finish in
/// time is reported as [`ResolveError::Unresolved`].
pub async fn decode_resolved<R: Resolve>(
    bytes: &[u8],
    schema: Option<&Schema>,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<Record, ResolveError<R::Error>> {
    match schema {
        Some(schema) => {
            let record = decode_with(bytes, Some(schema))?;
            resolve(record, schema, resolver, timeout).await
        }
        None => {
            let (schema, record) = decode_self_described(bytes)?;
            resolve(record, &schema, resolver, timeout).await
        }
    }
}

/// The synchronous counterpart of [`decode_resolved`].
pub fn decode_resolved_sync<R: ResolveSync>(
    bytes: &[u8],
    schema: Option<&Schema>,
    resolver: &R,
) -> Result<Record, ResolveError<R::Error>> {
    match schema {
        Some(schema) => {
            let record = decode_with(bytes, Some(schema))?;
            resolve_sync(record, schema, resolver)
        }
        None => {
            let (schema, record) = decode_self_described(bytes)?;
            resolve_sync(record, &schema, resolver)
        }
    }
}

/// Replace every unresolved `hash` value in `record`, at any depth, with the
/// record it references.
///
/// The lookup for each reference is bounded by `timeout` when one is given.
/// The timeout relies on the tokio timer, so must be awaited within a tokio
/// runtime with time enabled.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub async fn resolve<R: Resolve>(
    record: Record,
    schema: &Schema,
    resolver: &R,
    timeout: Option<Duration>,
) -> Result<Record, ResolveError<R::Error>> {
    resolve_fields(record, schema, resolver, timeout, String::new()).await
}

/// The synchronous counterpart of [`resolve`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn resolve_sync<R: ResolveSync>(
    record: Record,
    schema: &Schema,
    resolver: &R,
) -> Result<Record, ResolveError<R::Error>> {
    resolve_fields_sync(record, schema, resolver, "")
}

type ResolveFuture<'a, E> = Pin<Box<dyn Future<Output = Result<Record, ResolveError<E>>> + 'a>>;

fn resolve_fields<'a, R: Resolve>(
    mut record: Record,
    schema: &'a Schema,
    resolver: &'a R,
    timeout: Option<Duration>,
    path: String,
) -> ResolveFuture<'a, R::Error> {
    Box::pin(async move {
        for Field { name, ty } in schema {
            let field = join_path(&path, name);
            let Some(value) = record.remove(name) else {
                continue;
            };
            let value = match (ty, value) {
                (FieldType::Hash(nested), Value::Hash(digest)) => {
                    let bytes = fetch(resolver, digest, timeout, &field).await?;
                    let target = open_entry(&bytes, digest, nested, &field)?;
                    Value::Object(resolve_fields(target, nested, resolver, timeout, field).await?)
                }
                (FieldType::Hash(nested) | FieldType::Object(nested), Value::Object(inner)) => {
                    Value::Object(resolve_fields(inner, nested, resolver, timeout, field).await?)
                }
                (_, value) => value,
            };
            record.insert(name.clone(), value);
        }
        Ok(record)
    })
}

fn resolve_fields_sync<R: ResolveSync>(
    mut record: Record,
    schema: &Schema,
    resolver: &R,
    path: &str,
) -> Result<Record, ResolveError<R::Error>> {
    for Field { name, ty } in schema {
        let field = join_path(path, name);
        let Some(value) = record.remove(name) else {
            continue;
        };
        let value = match (ty, value) {
            (FieldType::Hash(nested), Value::Hash(digest)) => {
                let bytes = resolver
                    .resolve(&digest)
                    .map_err(ResolveError::Resolver)?
                    .ok_or_else(|| unresolved(&field, digest))?;
                let target = open_entry(&bytes, digest, nested, &field)?;
                Value::Object(resolve_fields_sync(target, nested, resolver, &field)?)
            }
            (FieldType::Hash(nested) | FieldType::Object(nested), Value::Object(inner)) => {
                Value::Object(resolve_fields_sync(inner, nested, resolver, &field)?)
            }
            (_, value) => value,
        };
        record.insert(name.clone(), value);
    }
    Ok(record)
}

async fn fetch<R: Resolve>(
    resolver: &R,
    digest: Digest,
    timeout: Option<Duration>,
    field: &str,
) -> Result<Vec<u8>, ResolveError<R::Error>> {
    let lookup = resolver.resolve(digest);
    let found = match timeout {
        Some(limit) => match tokio::time::timeout(limit, lookup).await {
            Ok(found) => found,
            Err(_elapsed) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("lookup of {digest} for `{field}` timed out after {limit:?}");
                return Err(unresolved(field, digest));
            }
        },
        None => lookup.await,
    };
    found
        .map_err(ResolveError::Resolver)?
        .ok_or_else(|| unresolved(field, digest))
}

fn unresolved<E>(field: &str, digest: Digest) -> ResolveError<E> {
    #[cfg(feature = "tracing")]
    tracing::debug!("no entry for {digest} referenced by `{field}`");
    ResolveError::Unresolved {
        field: field.to_string(),
        digest,
    }
}

/// Check resolved bytes against the reference and decode them.
fn open_entry<E>(
    bytes: &[u8],
    digest: Digest,
    schema: &Schema,
    field: &str,
) -> Result<Record, ResolveError<E>> {
    let actual = packlog_hash::hash_bytes(bytes);
    if actual != digest {
        return Err(ResolveError::DigestMismatch {
            field: field.to_string(),
            digest,
            actual,
        });
    }
    let (embedded, record) = decode_self_described(bytes)?;
    if embedded != *schema {
        return Err(ResolveError::SchemaMismatch {
            field: field.to_string(),
            digest,
        });
    }
    Ok(record)
}
