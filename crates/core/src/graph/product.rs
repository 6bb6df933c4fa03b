use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of artifact a target produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    Bundle,
    UnitTests,
    UiTests,
    AppExtension,
    AppClip,
    WatchApplication,
    WatchExtension,
    MessagesExtension,
    StickerPackExtension,
    TvTopShelfExtension,
    CommandLineTool,
    XpcService,
    SystemExtension,
}

impl Product {
    pub fn is_test_bundle(&self) -> bool {
        matches!(self, Product::UnitTests | Product::UiTests)
    }

    /// Products expected to have at least one source file
    pub fn compiles_sources(&self) -> bool {
        !matches!(
            self,
            Product::Bundle | Product::WatchApplication | Product::StickerPackExtension
        )
    }

    /// Whether a target producing `self` may declare a dependency on a
    /// target producing `dependency`
    pub fn can_depend_on(&self, dependency: Product) -> bool {
        match dependency {
            Product::UnitTests | Product::UiTests => false,
            Product::App => self.is_test_bundle(),
            Product::WatchApplication | Product::AppClip => *self == Product::App,
            Product::WatchExtension => *self == Product::WatchApplication,
            _ => true,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Product::App => "application",
            Product::StaticLibrary => "static library",
            Product::DynamicLibrary => "dynamic library",
            Product::Framework => "dynamic framework",
            Product::StaticFramework => "static framework",
            Product::Bundle => "bundle",
            Product::UnitTests => "unit tests",
            Product::UiTests => "ui tests",
            Product::AppExtension => "app extension",
            Product::AppClip => "app clip",
            Product::WatchApplication => "watch application",
            Product::WatchExtension => "watch extension",
            Product::MessagesExtension => "messages extension",
            Product::StickerPackExtension => "sticker pack extension",
            Product::TvTopShelfExtension => "tv top shelf extension",
            Product::CommandLineTool => "command line tool",
            Product::XpcService => "xpc service",
            Product::SystemExtension => "system extension",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_depends_on_test_bundles() {
        assert!(!Product::App.can_depend_on(Product::UnitTests));
        assert!(!Product::UnitTests.can_depend_on(Product::UiTests));
    }

    #[test]
    fn test_only_tests_depend_on_apps() {
        assert!(Product::UnitTests.can_depend_on(Product::App));
        assert!(Product::UiTests.can_depend_on(Product::App));
        assert!(!Product::Framework.can_depend_on(Product::App));
        assert!(!Product::App.can_depend_on(Product::App));
    }

    #[test]
    fn test_companion_links() {
        assert!(Product::App.can_depend_on(Product::WatchApplication));
        assert!(!Product::Framework.can_depend_on(Product::WatchApplication));
        assert!(Product::WatchApplication.can_depend_on(Product::WatchExtension));
        assert!(!Product::App.can_depend_on(Product::WatchExtension));
        assert!(Product::App.can_depend_on(Product::AppClip));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Product::WatchExtension).unwrap();
        assert_eq!(json, "\"watch_extension\"");
        let product: Product = serde_json::from_str("\"ui_tests\"").unwrap();
        assert_eq!(product, Product::UiTests);
    }
}
