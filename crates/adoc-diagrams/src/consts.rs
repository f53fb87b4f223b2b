//! Internal constants for diagram block conversion.

use std::time::Duration;

/// Document attribute naming the PlantUML server base URL.
pub const SERVER_URL_ATTR: &str = "plantuml-server-url";

/// Environment variable overriding the server URL document attribute.
pub const SERVER_URL_ENV: &str = "PLANTUML_SERVER_URL";

/// Document attribute enabling local fetch of rendered images.
pub const FETCH_ATTR: &str = "plantuml-fetch-diagram";

/// Role marker appended to successfully converted image blocks.
pub const ROLE_DIAGRAM: &str = "plantuml";

/// Role marker appended to blocks that could not be converted.
pub const ROLE_ERROR: &str = "plantuml-error";

/// Alt text used when a block has no target attribute.
pub const DEFAULT_ALT: &str = "diagram";

/// Default HTTP timeout for image fetches (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
