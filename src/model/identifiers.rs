//! Package identifier construction.

/// Build the generic purl for a Buildroot package.
///
/// Buildroot packages have no ecosystem registry, so they are identified as
/// `pkg:generic` with a `download_url` qualifier naming the upstream archive.
/// The qualifier is emitted verbatim; Buildroot consumers expect the plain
/// `<site>/<archive>` URL, not a percent-encoded form.
#[must_use]
pub fn generic_purl(name: &str, version: &str, download_url: &str) -> String {
    format!("pkg:generic/{name}@{version}?download_url={download_url}")
}
