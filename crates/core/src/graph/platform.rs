use serde::{Deserialize, Serialize};
use std::fmt;

use super::product::Product;

/// Native OS a target is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Macos,
    Tvos,
    Watchos,
    Visionos,
}

impl Platform {
    /// SDK used when building for a physical device
    pub fn device_sdk(&self) -> &'static str {
        match self {
            Platform::Ios => "iphoneos",
            Platform::Macos => "macosx",
            Platform::Tvos => "appletvos",
            Platform::Watchos => "watchos",
            Platform::Visionos => "xros",
        }
    }

    /// SDK used when building for a simulator. Desktop platforms have none.
    pub fn simulator_sdk(&self) -> Option<&'static str> {
        match self {
            Platform::Ios => Some("iphonesimulator"),
            Platform::Macos => None,
            Platform::Tvos => Some("appletvsimulator"),
            Platform::Watchos => Some("watchsimulator"),
            Platform::Visionos => Some("xrsimulator"),
        }
    }

    pub fn is_desktop(&self) -> bool {
        matches!(self, Platform::Macos)
    }

    /// Whether a target of `product` can be built for this platform
    pub fn supports(&self, product: Product) -> bool {
        match product {
            Product::WatchApplication | Product::WatchExtension => *self == Platform::Watchos,
            Product::AppClip | Product::MessagesExtension | Product::StickerPackExtension => {
                *self == Platform::Ios
            }
            Product::CommandLineTool | Product::XpcService | Product::SystemExtension => {
                *self == Platform::Macos
            }
            Product::TvTopShelfExtension => *self == Platform::Tvos,
            Product::UiTests => *self != Platform::Watchos,
            _ => true,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Macos => "macOS",
            Platform::Tvos => "tvOS",
            Platform::Watchos => "watchOS",
            Platform::Visionos => "visionOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}
