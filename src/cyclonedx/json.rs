//! CycloneDX JSON rendering.

use super::SpecVersion;
use crate::error::{Result, SbomError};
use crate::model::{BuildrootBom, Component};
use serde::Serialize;

/// Render the BOM as a pretty-printed CycloneDX JSON document.
///
/// Key order is the struct-declared order, stable across runs. The 3-space
/// indent is the historical output format of this generator; downstream
/// diff-based checks rely on it.
pub fn render_json(bom: &BuildrootBom, spec: SpecVersion) -> Result<String> {
    let document = JsonBom::build(bom, spec);

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| SbomError::render("JSON", e.to_string()))?;

    String::from_utf8(out).map_err(|e| SbomError::render("JSON", e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonBom {
    bom_format: &'static str,
    spec_version: &'static str,
    serial_number: String,
    version: u32,
    metadata: JsonMetadata,
    components: Vec<JsonComponent>,
    dependencies: Vec<JsonDependency>,
}

#[derive(Debug, Serialize)]
struct JsonMetadata {
    timestamp: String,
    tools: Vec<JsonTool>,
    component: JsonComponent,
    manufacture: JsonOrganization,
}

#[derive(Debug, Serialize)]
struct JsonTool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct JsonOrganization {
    name: String,
}

#[derive(Debug, Serialize)]
struct JsonComponent {
    #[serde(rename = "type")]
    component_type: &'static str,
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<JsonLicense>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonLicense {
    expression: String,
}

#[derive(Debug, Serialize)]
struct JsonDependency {
    #[serde(rename = "ref")]
    dependency_ref: String,
    #[serde(rename = "dependsOn")]
    depends_on: Vec<String>,
}

impl JsonBom {
    fn build(bom: &BuildrootBom, spec: SpecVersion) -> Self {
        let root = JsonComponent {
            component_type: "library",
            bom_ref: bom.root_ref().to_string(),
            name: bom.product.name.clone(),
            version: bom.product.version.clone(),
            licenses: None,
            cpe: None,
            purl: None,
        };

        let components = bom
            .components
            .values()
            .map(JsonComponent::from_component)
            .collect();

        // Flat graph: the root depends on every package, packages on nothing.
        let mut dependencies = Vec::with_capacity(bom.components.len() + 1);
        dependencies.push(JsonDependency {
            dependency_ref: bom.root_ref().to_string(),
            depends_on: bom
                .edges
                .iter()
                .filter(|edge| edge.from == bom.root_ref())
                .map(|edge| edge.to.clone())
                .collect(),
        });
        for name in bom.components.keys() {
            dependencies.push(JsonDependency {
                dependency_ref: name.clone(),
                depends_on: Vec::new(),
            });
        }

        Self {
            bom_format: "CycloneDX",
            spec_version: spec.as_str(),
            serial_number: super::serial_number(),
            version: 1,
            metadata: JsonMetadata {
                timestamp: super::timestamp(),
                tools: vec![JsonTool {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                }],
                component: root,
                manufacture: JsonOrganization {
                    name: bom.product.manufacturer.clone(),
                },
            },
            components,
            dependencies,
        }
    }
}

impl JsonComponent {
    fn from_component(component: &Component) -> Self {
        Self {
            component_type: "firmware",
            bom_ref: component.bom_ref().to_string(),
            name: component.name.clone(),
            version: component.version.clone(),
            licenses: component.license.clone().map(|expression| {
                vec![JsonLicense { expression }]
            }),
            cpe: component.cpe.clone(),
            purl: Some(component.purl.clone()),
        }
    }
}
