//! End-to-end pipeline tests.
//!
//! Each test builds a manifest (and optionally a CPE dictionary) in a fresh
//! temp directory, runs the full pipeline, and inspects the artifacts on
//! disk, the same path the CLI takes minus argument parsing.

use buildroot_sbom::{pipeline, GenerateConfig, SpecVersion};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str =
    "PACKAGE,VERSION,LICENSE,LICENSE FILES,SOURCE ARCHIVE,SOURCE SITE,DEPENDENCIES WITH LICENSES";

fn write_manifest(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("manifest.csv");
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).expect("write manifest");
    path
}

fn config_for(dir: &Path, manifest: PathBuf) -> GenerateConfig {
    GenerateConfig {
        manifest,
        product_name: "router-fw".to_string(),
        product_version: "2024.02".to_string(),
        manufacturer: "Acme".to_string(),
        output_base: dir.join("sbom").to_string_lossy().into_owned(),
        ..GenerateConfig::default()
    }
}

fn parse_json(path: &Path) -> Value {
    let content = fs::read_to_string(path).expect("read JSON artifact");
    serde_json::from_str(&content).expect("artifact is valid JSON")
}

#[test]
fn test_three_row_manifest_produces_both_artifacts() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &[
            "boost,1.83.0,BSL-1.0,LICENSE_1_0.txt,boost_1_83_0.tar.bz2,https://boostorg.jfrog.io/artifactory/main/release/1.83.0/source,",
            "zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,",
            "curl,8.5.0,curl,COPYING,curl-8.5.0.tar.xz,https://curl.se/download,zlib [Zlib]",
        ],
    );

    let artifacts =
        pipeline::generate(&config_for(dir.path(), manifest)).expect("pipeline succeeds");
    assert_eq!(artifacts.component_count, 3);

    // JSON artifact: three components, purls in the Buildroot generic form.
    let doc = parse_json(&artifacts.json);
    assert_eq!(doc["bomFormat"], "CycloneDX");
    assert_eq!(doc["specVersion"], "1.4");
    let components = doc["components"].as_array().expect("components");
    assert_eq!(components.len(), 3);
    assert_eq!(
        components[1]["purl"],
        "pkg:generic/zlib@1.3.1?download_url=https://zlib.net/zlib-1.3.1.tar.gz"
    );
    assert_eq!(
        components[2]["purl"],
        "pkg:generic/curl@8.5.0?download_url=https://curl.se/download/curl-8.5.0.tar.xz"
    );

    // One dependency entry for the root naming all three, one per package.
    let deps = doc["dependencies"].as_array().expect("dependencies");
    assert_eq!(deps.len(), 4);
    assert_eq!(deps[0]["ref"], "router-fw");
    assert_eq!(deps[0]["dependsOn"].as_array().expect("dependsOn").len(), 3);

    // XML artifact: well-formed, multi-line, same data.
    let xml = fs::read_to_string(&artifacts.xml).expect("read XML artifact");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.lines().count() > 20, "indented output:\n{xml}");
    assert!(xml.contains("<name>boost</name>"));
    assert!(xml.contains("bom-ref=\"curl\""));

    // The single-line intermediate is cleaned up.
    let leftover = PathBuf::from(format!(
        "{}.one.xml",
        dir.path().join("sbom").to_string_lossy()
    ));
    assert!(!leftover.exists(), "intermediate XML file was not removed");
}

#[test]
fn test_missing_column_aborts_without_artifacts() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("manifest.csv");
    fs::write(
        &path,
        "PACKAGE,VERSION,LICENSE,LICENSE FILES,SOURCE ARCHIVE,SOURCE SITE\n\
         zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net\n",
    )
    .expect("write manifest");

    let config = config_for(dir.path(), path);
    let err = pipeline::generate(&config).expect_err("missing column is fatal");
    assert!(format!("{err}").contains("manifest"));

    assert!(!Path::new(&format!("{}.json", config.output_base)).exists());
    assert!(!Path::new(&format!("{}.xml", config.output_base)).exists());
    assert!(!Path::new(&format!("{}.one.xml", config.output_base)).exists());
}

#[test]
fn test_empty_manifest_yields_empty_component_list() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(dir.path(), &[]);

    let artifacts =
        pipeline::generate(&config_for(dir.path(), manifest)).expect("pipeline succeeds");
    assert_eq!(artifacts.component_count, 0);

    let doc = parse_json(&artifacts.json);
    assert!(doc["components"].as_array().expect("components").is_empty());
}

#[test]
fn test_cpe_detail_map_enrichment() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &["zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,"],
    );
    let cpe_path = dir.path().join("cpe.json");
    fs::write(
        &cpe_path,
        r#"{"k1": {"name": "zlib", "cpe-id": "cpe:2.3:a:zlib:zlib"}}"#,
    )
    .expect("write cpe dictionary");

    let mut config = config_for(dir.path(), manifest);
    config.cpe_file = Some(cpe_path);

    let artifacts = pipeline::generate(&config).expect("pipeline succeeds");
    let doc = parse_json(&artifacts.json);
    assert_eq!(doc["components"][0]["cpe"], "cpe:2.3:a:zlib:zlib");
}

#[test]
fn test_cpe_nested_lookup_enrichment() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &[
            "zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,",
            "curl,8.5.0,curl,COPYING,curl-8.5.0.tar.xz,https://curl.se/download,",
        ],
    );
    let cpe_path = dir.path().join("cpe.json");
    fs::write(
        &cpe_path,
        r#"{"pkgs": {"zlib": {"cpeid": "cpe:2.3:a:zlib:zlib"}}}"#,
    )
    .expect("write cpe dictionary");

    let mut config = config_for(dir.path(), manifest);
    config.cpe_file = Some(cpe_path);

    let artifacts = pipeline::generate(&config).expect("pipeline succeeds");
    let doc = parse_json(&artifacts.json);
    assert_eq!(doc["components"][0]["cpe"], "cpe:2.3:a:zlib:zlib");
    assert!(
        doc["components"][1].get("cpe").is_none(),
        "unmatched package carries no cpe"
    );
}

#[test]
fn test_no_cpe_dictionary_is_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &["zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,"],
    );

    // cpe_file stays None, as the "unknown" CLI sentinel resolves it; there is
    // no dictionary anywhere on disk and the run must not try to find one.
    let config = config_for(dir.path(), manifest);
    assert!(config.cpe_file.is_none());

    let artifacts = pipeline::generate(&config).expect("pipeline succeeds");
    let doc = parse_json(&artifacts.json);
    assert!(doc["components"][0].get("cpe").is_none());
}

#[test]
fn test_missing_cpe_dictionary_file_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &["zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,"],
    );

    let mut config = config_for(dir.path(), manifest);
    config.cpe_file = Some(dir.path().join("does-not-exist.json"));

    assert!(pipeline::generate(&config).is_err());
    assert!(!Path::new(&format!("{}.json", config.output_base)).exists());
}

#[test]
fn test_invalid_license_fields_yield_no_license_entries() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &[
            "\"busybox\",1.36.1,\"GPL-2.0, BSD-3-Clause\",LICENSE,busybox-1.36.1.tar.bz2,https://busybox.net/downloads,",
            "zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,",
        ],
    );

    let artifacts =
        pipeline::generate(&config_for(dir.path(), manifest)).expect("pipeline succeeds");
    let doc = parse_json(&artifacts.json);

    let busybox = &doc["components"][0];
    assert_eq!(busybox["name"], "busybox");
    assert!(busybox.get("licenses").is_none());

    let zlib = &doc["components"][1];
    assert_eq!(zlib["licenses"][0]["expression"], "Zlib");
}

#[test]
fn test_duplicate_package_names_keep_the_last_row() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &[
            "zlib,1.3.0,Zlib,LICENSE,zlib-1.3.0.tar.gz,https://zlib.net,",
            "zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,",
        ],
    );

    let artifacts =
        pipeline::generate(&config_for(dir.path(), manifest)).expect("pipeline succeeds");
    assert_eq!(artifacts.component_count, 1);

    let doc = parse_json(&artifacts.json);
    let components = doc["components"].as_array().expect("components");
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["version"], "1.3.1");

    let deps = doc["dependencies"].as_array().expect("dependencies");
    assert_eq!(deps[0]["dependsOn"].as_array().expect("dependsOn").len(), 1);
}

#[test]
fn test_spec_version_selector_reaches_both_documents() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = write_manifest(
        dir.path(),
        &["zlib,1.3.1,Zlib,LICENSE,zlib-1.3.1.tar.gz,https://zlib.net,"],
    );

    let mut config = config_for(dir.path(), manifest);
    config.spec_version = SpecVersion::V1_6;

    let artifacts = pipeline::generate(&config).expect("pipeline succeeds");
    let doc = parse_json(&artifacts.json);
    assert_eq!(doc["specVersion"], "1.6");

    let xml = fs::read_to_string(&artifacts.xml).expect("read XML artifact");
    assert!(xml.contains("http://cyclonedx.org/schema/bom/1.6"));
}
