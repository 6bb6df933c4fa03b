use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::BuildArgument;
use crate::config::ForgeConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphTarget, Platform, Project, Scheme, Target, TargetLookup};
use crate::interfaces::{BuildGraphInspecting, FileSystem};
use crate::services::LocalFileSystem;

/// Settings overridden, in this order, to build without code signing
const SKIP_SIGNING_SETTINGS: [(&str, &str); 4] = [
    ("CODE_SIGN_IDENTITY", ""),
    ("CODE_SIGNING_REQUIRED", "NO"),
    ("CODE_SIGN_ENTITLEMENTS", ""),
    ("CODE_SIGNING_ALLOWED", "NO"),
];

pub struct BuildGraphInspector {
    config: ForgeConfig,
    file_system: Arc<dyn FileSystem>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for BuildGraphInspector {
    fn default() -> Self {
        Self::new(
            ForgeConfig::default(),
            Arc::new(LocalFileSystem::new()),
            Arc::new(TracingSink),
        )
    }
}

impl BuildGraphInspector {
    pub fn new(
        config: ForgeConfig,
        file_system: Arc<dyn FileSystem>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            config,
            file_system,
            sink,
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    fn sdk_argument(&self, platform: Platform) -> BuildArgument {
        if platform.is_desktop() {
            return BuildArgument::sdk(platform.device_sdk());
        }
        match platform.simulator_sdk() {
            Some(sdk) => BuildArgument::sdk(sdk),
            None => {
                self.sink.error(&format!(
                    "{platform} has no simulator SDK, building against {}",
                    platform.device_sdk()
                ));
                BuildArgument::sdk(platform.device_sdk())
            }
        }
    }

    fn contains_marker(&self, workspace: &Path) -> Result<bool> {
        if !self.file_system.is_dir(workspace) {
            return Ok(false);
        }
        let marker = OsStr::new(&self.config.generated_marker);
        Ok(self
            .file_system
            .list_contents(workspace)?
            .iter()
            .any(|path| path.file_name() == Some(marker)))
    }
}

fn sorted_by_name(mut schemes: Vec<&Scheme>) -> Vec<&Scheme> {
    schemes.sort_by(|a, b| a.name.cmp(&b.name));
    schemes
}

impl BuildGraphInspecting for BuildGraphInspector {
    fn build_arguments(
        &self,
        project: &Project,
        target: &Target,
        configuration: Option<&str>,
        skip_signing: bool,
    ) -> Vec<BuildArgument> {
        let mut arguments = vec![self.sdk_argument(target.platform)];

        if let Some(configuration) = configuration {
            let settings = target.effective_settings(project);
            if settings.configuration(configuration).is_some() {
                arguments.push(BuildArgument::configuration(configuration));
            } else {
                self.sink.warning(&format!(
                    "The scheme's targets don't have the given configuration {configuration}. Defaulting to the scheme's default."
                ));
            }
        }

        if skip_signing {
            arguments.extend(
                SKIP_SIGNING_SETTINGS
                    .iter()
                    .map(|(key, value)| BuildArgument::xcarg(*key, *value)),
            );
        }

        arguments
    }

    fn buildable_target<'g>(&self, scheme: &Scheme, graph: &'g Graph) -> Option<GraphTarget<'g>> {
        let reference = scheme.build_targets().first()?;
        graph.resolve(reference)
    }

    fn testable_target<'g>(&self, scheme: &Scheme, graph: &'g Graph) -> Option<GraphTarget<'g>> {
        let reference = scheme.test_targets().first()?;
        graph.resolve(reference)
    }

    fn buildable_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme> {
        sorted_by_name(graph.schemes().filter(|s| s.is_buildable()).collect())
    }

    fn buildable_entry_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme> {
        sorted_by_name(
            graph
                .entry_projects()
                .into_iter()
                .flat_map(|project| project.schemes.iter())
                .filter(|s| s.is_buildable())
                .collect(),
        )
    }

    fn testable_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme> {
        sorted_by_name(graph.schemes().filter(|s| s.is_testable()).collect())
    }

    fn test_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme> {
        // The name list is compared in declaration order, so a scheme only
        // qualifies when it tests exactly this one target.
        let candidates = graph
            .all_targets()
            .filter(|node| node.target.product.is_test_bundle())
            .flat_map(|node| {
                node.project.schemes.iter().filter(move |scheme| {
                    scheme.test_target_names() == [node.target.name.as_str()]
                })
            })
            .filter(|s| s.is_testable());

        // Same-named test targets match the same scheme more than once
        let mut schemes: Vec<&Scheme> = Vec::new();
        for scheme in candidates {
            if !schemes.iter().any(|seen| std::ptr::eq(*seen, scheme)) {
                schemes.push(scheme);
            }
        }
        sorted_by_name(schemes)
    }

    fn project_schemes<'g>(&self, graph: &'g Graph) -> Vec<&'g Scheme> {
        let pattern = self.config.project_scheme_pattern(&graph.workspace.name);
        sorted_by_name(
            graph
                .workspace
                .schemes
                .iter()
                .filter(|s| s.name.contains(&pattern))
                .collect(),
        )
    }

    fn workspace_path(&self, directory: &Path) -> Result<Option<PathBuf>> {
        if !self.file_system.exists(directory) || !self.file_system.is_dir(directory) {
            return Err(Error::DirectoryNotFound(directory.to_path_buf()));
        }

        let pattern = format!("**/*.{}", self.config.workspace_extension);
        for candidate in self.file_system.glob(directory, &pattern)? {
            if self.contains_marker(&candidate)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::graph::{
        BuildConfiguration, Product, Settings, TargetReference, Workspace,
    };
    use std::collections::BTreeMap;

    /// Directory tree kept in memory: directory path -> child paths
    #[derive(Default)]
    struct InMemoryFileSystem {
        directories: BTreeMap<PathBuf, Vec<PathBuf>>,
    }

    impl InMemoryFileSystem {
        fn with_directory(mut self, path: &str, children: &[&str]) -> Self {
            let path = PathBuf::from(path);
            let children = children.iter().map(|child| path.join(child)).collect();
            self.directories.insert(path, children);
            self
        }
    }

    impl FileSystem for InMemoryFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.directories.contains_key(path)
                || self.directories.values().flatten().any(|p| p == path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.directories.contains_key(path)
        }

        fn list_contents(&self, directory: &Path) -> Result<Vec<PathBuf>> {
            Ok(self.directories.get(directory).cloned().unwrap_or_default())
        }

        fn glob(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
            let extension = pattern.trim_start_matches("**/*.");
            Ok(self
                .directories
                .keys()
                .filter(|path| path.starts_with(directory))
                .filter(|path| path.extension() == Some(OsStr::new(extension)))
                .cloned()
                .collect())
        }
    }

    fn inspector_with(sink: Arc<MemorySink>) -> BuildGraphInspector {
        BuildGraphInspector::new(
            ForgeConfig::default(),
            Arc::new(InMemoryFileSystem::default()),
            sink,
        )
    }

    fn target(name: &str, product: Product, platform: Platform) -> Target {
        Target::new(name, product, platform, format!("io.{name}"))
    }

    fn reference(name: &str) -> TargetReference {
        TargetReference::new("/app", name)
    }

    #[test]
    fn test_build_arguments_for_simulator_platform() {
        let project = Project::new("/app", "App");
        let app = target("App", Product::App, Platform::Ios);

        let arguments = BuildGraphInspector::default().build_arguments(&project, &app, None, false);

        assert_eq!(arguments, vec![BuildArgument::sdk("iphonesimulator")]);
    }

    #[test]
    fn test_build_arguments_for_desktop_platform() {
        let project = Project::new("/app", "App");
        let tool = target("Tool", Product::CommandLineTool, Platform::Macos);

        let arguments =
            BuildGraphInspector::default().build_arguments(&project, &tool, Some("Release"), false);

        assert_eq!(
            arguments,
            vec![
                BuildArgument::sdk("macosx"),
                BuildArgument::configuration("Release"),
            ]
        );
    }

    #[test]
    fn test_unknown_configuration_warns_and_is_skipped() {
        let sink = MemorySink::shared();
        let project = Project::new("/app", "App");
        let app = target("App", Product::App, Platform::Tvos);

        let arguments = inspector_with(sink.clone()).build_arguments(&project, &app, Some("Beta"), false);

        assert_eq!(arguments, vec![BuildArgument::sdk("appletvsimulator")]);
        assert_eq!(
            sink.warnings(),
            vec![
                "The scheme's targets don't have the given configuration Beta. Defaulting to the scheme's default."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_configuration_resolved_from_target_settings_first() {
        let sink = MemorySink::shared();
        let project = Project::new("/app", "App");
        let app = target("App", Product::App, Platform::Ios).with_settings(
            Settings::empty().with_configuration(BuildConfiguration::release("Beta"), None),
        );

        let inspector = inspector_with(sink.clone());
        let beta = inspector.build_arguments(&project, &app, Some("Beta"), false);
        let debug = inspector.build_arguments(&project, &app, Some("Debug"), false);

        assert_eq!(beta.last(), Some(&BuildArgument::configuration("Beta")));
        assert_eq!(debug, vec![BuildArgument::sdk("iphonesimulator")]);
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_skip_signing_appends_four_arguments_last() {
        let project = Project::new("/app", "App");
        let app = target("App", Product::App, Platform::Watchos);

        let arguments =
            BuildGraphInspector::default().build_arguments(&project, &app, Some("Debug"), true);

        assert_eq!(
            arguments,
            vec![
                BuildArgument::sdk("watchsimulator"),
                BuildArgument::configuration("Debug"),
                BuildArgument::xcarg("CODE_SIGN_IDENTITY", ""),
                BuildArgument::xcarg("CODE_SIGNING_REQUIRED", "NO"),
                BuildArgument::xcarg("CODE_SIGN_ENTITLEMENTS", ""),
                BuildArgument::xcarg("CODE_SIGNING_ALLOWED", "NO"),
            ]
        );
    }

    fn graph() -> Graph {
        let project = Project::new("/app", "App")
            .with_target(target("App", Product::App, Platform::Ios))
            .with_target(target("AppTests", Product::UnitTests, Platform::Ios))
            .with_target(target("AppUITests", Product::UiTests, Platform::Ios))
            .with_target(target("Kit", Product::Framework, Platform::Ios))
            .with_scheme(
                Scheme::new("App")
                    .with_build_targets(vec![reference("App"), reference("Kit")])
                    .with_test_targets(vec![reference("AppTests"), reference("AppUITests")]),
            )
            .with_scheme(Scheme::new("AppTests").with_test_targets(vec![reference("AppTests")]))
            .with_scheme(
                Scheme::new("AppUITests").with_test_targets(vec![reference("AppUITests")]),
            )
            .with_scheme(Scheme::new("Kit").with_build_targets(vec![reference("Kit")]))
            .with_scheme(Scheme::new("Empty").with_build_targets(vec![]));
        let tools = Project::new("/tools", "Tools")
            .with_target(target("Tool", Product::CommandLineTool, Platform::Macos))
            .with_scheme(
                Scheme::new("Tool").with_build_targets(vec![TargetReference::new("/tools", "Tool")]),
            );

        Graph::new(Workspace::new("Shop", "/Shop.xcworkspace"))
            .with_project(project)
            .with_project(tools)
            .with_workspace_scheme(
                Scheme::new("Shop-Project")
                    .with_build_targets(vec![reference("App"), TargetReference::new("/tools", "Tool")]),
            )
            .with_workspace_scheme(Scheme::new("Another-Shop-Project-Debug"))
            .with_entry_node(TargetReference::new("/tools", "Tool"))
    }

    fn names(schemes: Vec<&Scheme>) -> Vec<&str> {
        schemes.into_iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_buildable_target_uses_first_reference() {
        let graph = graph();
        let inspector = BuildGraphInspector::default();
        let scheme = &graph.project(Path::new("/app")).unwrap().schemes[0];

        let found = inspector.buildable_target(scheme, &graph).unwrap();
        assert_eq!(found.target.name, "App");
        assert_eq!(found.project.path, PathBuf::from("/app"));

        let tests = inspector.testable_target(scheme, &graph).unwrap();
        assert_eq!(tests.target.name, "AppTests");
    }

    #[test]
    fn test_buildable_target_absent_or_unresolved() {
        let graph = graph();
        let inspector = BuildGraphInspector::default();

        assert!(inspector.buildable_target(&Scheme::new("None"), &graph).is_none());
        assert!(inspector
            .buildable_target(&Scheme::new("Empty").with_build_targets(vec![]), &graph)
            .is_none());
        assert!(inspector
            .buildable_target(
                &Scheme::new("Ghost").with_build_targets(vec![reference("Ghost"), reference("App")]),
                &graph
            )
            .is_none());
        assert!(inspector.testable_target(&Scheme::new("None"), &graph).is_none());
    }

    #[test]
    fn test_buildable_schemes_sorted() {
        let graph = graph();
        assert_eq!(
            names(BuildGraphInspector::default().buildable_schemes(&graph)),
            vec!["App", "Kit", "Shop-Project", "Tool"]
        );
    }

    #[test]
    fn test_buildable_entry_schemes() {
        let graph = graph();
        assert_eq!(
            names(BuildGraphInspector::default().buildable_entry_schemes(&graph)),
            vec!["Tool"]
        );
    }

    #[test]
    fn test_testable_schemes_sorted() {
        let graph = graph();
        assert_eq!(
            names(BuildGraphInspector::default().testable_schemes(&graph)),
            vec!["App", "AppTests", "AppUITests"]
        );
    }

    #[test]
    fn test_test_schemes_only_single_target_schemes() {
        let graph = graph();
        assert_eq!(
            names(BuildGraphInspector::default().test_schemes(&graph)),
            vec!["AppTests", "AppUITests"]
        );
    }

    #[test]
    fn test_test_schemes_listed_once_for_same_named_targets() {
        let project = Project::new("/app", "App")
            .with_target(target("AppTests", Product::UnitTests, Platform::Ios))
            .with_target(target("AppTests", Product::UnitTests, Platform::Ios))
            .with_scheme(Scheme::new("AppTests").with_test_targets(vec![reference("AppTests")]));
        let graph = Graph::new(Workspace::new("Shop", "/Shop.xcworkspace")).with_project(project);

        assert_eq!(
            names(BuildGraphInspector::default().test_schemes(&graph)),
            vec!["AppTests"]
        );
    }

    #[test]
    fn test_project_schemes_match_workspace_pattern() {
        let graph = graph();
        assert_eq!(
            names(BuildGraphInspector::default().project_schemes(&graph)),
            vec!["Another-Shop-Project-Debug", "Shop-Project"]
        );
    }

    #[test]
    fn test_workspace_path_picks_generated_workspace() {
        let file_system = InMemoryFileSystem::default()
            .with_directory("/repo", &["A.xcworkspace", "nested"])
            .with_directory("/repo/A.xcworkspace", &["contents.xcworkspacedata"])
            .with_directory("/repo/nested", &["B.xcworkspace"])
            .with_directory(
                "/repo/nested/B.xcworkspace",
                &["contents.xcworkspacedata", ".forge-generated"],
            );
        let inspector = BuildGraphInspector::new(
            ForgeConfig::default(),
            Arc::new(file_system),
            Arc::new(TracingSink),
        );

        assert_eq!(
            inspector.workspace_path(Path::new("/repo")).unwrap(),
            Some(PathBuf::from("/repo/nested/B.xcworkspace"))
        );
    }

    #[test]
    fn test_workspace_path_none_without_marker() {
        let file_system = InMemoryFileSystem::default()
            .with_directory("/repo", &["A.xcworkspace"])
            .with_directory("/repo/A.xcworkspace", &["contents.xcworkspacedata"]);
        let inspector = BuildGraphInspector::new(
            ForgeConfig::default(),
            Arc::new(file_system),
            Arc::new(TracingSink),
        );

        assert_eq!(inspector.workspace_path(Path::new("/repo")).unwrap(), None);
    }

    #[test]
    fn test_workspace_path_rejects_a_file() {
        let file_system = InMemoryFileSystem::default().with_directory("/repo", &["Package.swift"]);
        let inspector = BuildGraphInspector::new(
            ForgeConfig::default(),
            Arc::new(file_system),
            Arc::new(TracingSink),
        );

        let err = inspector
            .workspace_path(Path::new("/repo/Package.swift"))
            .unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(path) if path == Path::new("/repo/Package.swift")));
    }

    #[test]
    fn test_workspace_path_missing_directory() {
        let inspector = inspector_with(MemorySink::shared());
        let err = inspector.workspace_path(Path::new("/nowhere")).unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(_)));
    }
}
