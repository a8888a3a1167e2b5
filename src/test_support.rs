//! Builders for in-memory project descriptors used by unit tests.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::model::PhaseKind;
use crate::project::ProjectDescriptor;

/// Xcode-shaped id: one prefix character followed by 23 hex digits.
pub fn id(prefix: char, n: u32) -> String {
    format!("{}{:023X}", prefix, n)
}

/// One entry of a phase: the file reference id and optional settings.
pub type EntrySpec = (String, Option<Value>);

/// Assembles the JSON text of a project descriptor.
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    objects: Map<String, Value>,
    targets: Vec<String>,
    counters: HashMap<char, u32>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self, prefix: char) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        *counter += 1;
        id(prefix, *counter)
    }

    /// Add a `PBXFileReference` and return its id.
    pub fn file(&mut self, path: &str) -> String {
        let file_id = self.next_id('F');
        self.objects.insert(
            file_id.clone(),
            json!({
                "isa": "PBXFileReference",
                "path": path,
                "sourceTree": "<group>",
            }),
        );
        file_id
    }

    /// Add a named native target with the given phases and return its id.
    pub fn target(&mut self, name: &str, phases: &[(PhaseKind, Vec<EntrySpec>)]) -> String {
        let mut phase_ids = Vec::new();
        for (kind, entries) in phases {
            let mut files = Vec::new();
            for (file_ref, settings) in entries {
                let build_id = self.next_id('B');
                let mut object = json!({"isa": "PBXBuildFile", "fileRef": file_ref});
                if let Some(settings) = settings {
                    object["settings"] = settings.clone();
                }
                self.objects.insert(build_id.clone(), object);
                files.push(build_id);
            }
            let phase_id = self.next_id('P');
            self.objects.insert(
                phase_id.clone(),
                json!({
                    "isa": kind.isa(),
                    "buildActionMask": "2147483647",
                    "files": files,
                    "runOnlyForDeploymentPostprocessing": "0",
                }),
            );
            phase_ids.push(phase_id);
        }

        let target_id = self.next_id('T');
        self.objects.insert(
            target_id.clone(),
            json!({
                "isa": "PBXNativeTarget",
                "name": name,
                "buildPhases": phase_ids,
                "productName": name,
                "productType": "com.apple.product-type.application",
            }),
        );
        self.targets.push(target_id.clone());
        target_id
    }

    /// Add a raw object under an explicit id.
    pub fn object(&mut self, object_id: &str, object: Value) {
        self.objects.insert(object_id.to_string(), object);
    }

    /// The descriptor as JSON text.
    pub fn build(&self) -> String {
        let root_id = id('R', 1);
        let mut objects = self.objects.clone();
        objects.insert(
            root_id.clone(),
            json!({
                "isa": "PBXProject",
                "targets": self.targets,
            }),
        );
        let root = json!({
            "archiveVersion": "1",
            "classes": {},
            "objectVersion": "46",
            "objects": objects,
            "rootObject": root_id,
        });
        serde_json::to_string_pretty(&root).expect("serializable project")
    }

    /// The descriptor, parsed.
    pub fn descriptor(&self) -> ProjectDescriptor {
        ProjectDescriptor::from_json_str(&self.build()).expect("valid project")
    }
}

/// Two targets: "App" with sources, frameworks, and resources; "App Beta"
/// with one source file, an empty frameworks phase, and no resources phase.
pub fn sample_project() -> String {
    let mut builder = ProjectBuilder::new();
    let delegate = builder.file("App/AppDelegate.m");
    let main = builder.file("App/main.m");
    let uikit = builder.file("System/Library/Frameworks/UIKit.framework");
    let storyboard = builder.file("App/Base.lproj/Main.storyboard");
    let beta_only = builder.file("App/BetaOnly.m");

    builder.target(
        "App",
        &[
            (PhaseKind::Sources, vec![(delegate, None), (main, None)]),
            (PhaseKind::Frameworks, vec![(uikit, None)]),
            (PhaseKind::Resources, vec![(storyboard, None)]),
        ],
    );
    builder.target(
        "App Beta",
        &[
            (PhaseKind::Sources, vec![(beta_only, None)]),
            (PhaseKind::Frameworks, vec![]),
        ],
    );
    builder.build()
}
