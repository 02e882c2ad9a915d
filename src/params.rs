//! Fixed parameters of every mandala generation request.

/// Model identifier sent to the image API.
pub const MODEL: &str = "dall-e-3";

/// Square output resolution, as the API spells it.
pub const SIZE: &str = "1024x1024";

/// Edge length in pixels of the image produced for [`SIZE`].
pub const EDGE_PX: u32 = 1024;

/// Quality tier.
pub const QUALITY: &str = "standard";

/// Style tier.
pub const STYLE: &str = "vivid";

/// Number of images per request.
pub const COUNT: u32 = 1;

/// Ask the API for a URL rather than inline base64.
pub const RESPONSE_FORMAT: &str = "url";
