//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a pooled connection in seconds
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECONDS: u64 = 10;

/// Time the health check waits for the database in seconds
pub const HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 3;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Maximum password length accepted at login
pub const MAX_PASSWORD_LENGTH: u64 = 128;

// =============================================================================
// STORAGE & IMPORT DEFAULTS
// =============================================================================

/// Default media root on disk
pub const DEFAULT_MEDIA_ROOT: &str = "/data/media";

/// Default public prefix for media paths
pub const DEFAULT_MEDIA_URL: &str = "/media/";

/// Default timeout for bulk import HTTP requests in seconds
pub const DEFAULT_IMPORT_TIMEOUT_SECONDS: u64 = 30;

/// User agent sent when probing and downloading bulk import media
pub const DEFAULT_IMPORT_USER_AGENT: &str = "playbook-bulk-import/0.1";

/// Maximum accepted CSV upload size in bytes (5 MB)
pub const MAX_BULK_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Maximum accepted media upload size in bytes (50 MB)
pub const MAX_MEDIA_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Image used when an assignment is created without a tile image
pub const DEFAULT_ASSIGNMENT_IMAGE: &str = "assignments/images/default.jpeg";

/// Directory (relative to the media root) for stored images
pub const IMAGE_UPLOAD_DIR: &str = "assignments/images";

/// Directory (relative to the media root) for stored videos
pub const VIDEO_UPLOAD_DIR: &str = "assignments/videos";

// =============================================================================
// USER PROFILE
// =============================================================================

/// Youngest age a user profile may carry
pub const MIN_USER_AGE: i16 = 13;

/// Oldest age a user profile may carry
pub const MAX_USER_AGE: i16 = 99;

/// Role names carried in access tokens
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

/// Gender labels as stored on user profiles
pub mod genders {
    pub const MALE: &str = "Male";
    pub const FEMALE: &str = "Female";
    pub const NON_BINARY: &str = "Non-Binary";
    pub const TRANSGENDER: &str = "Transgender";
    pub const OTHER: &str = "Other";

    /// All gender labels
    pub const ALL: &[&str] = &[MALE, FEMALE, NON_BINARY, TRANSGENDER, OTHER];
}

/// Activity labels as stored on user profiles
pub mod activities {
    pub const LAW_EXPLORERS: &str = "Law Explorers";

    /// All activity labels
    pub const ALL: &[&str] = &[LAW_EXPLORERS];
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

/// Number of assignments surfaced by the discover queue
pub const DISCOVER_QUEUE_SIZE: i64 = 4;

/// Maximum assignment/category/target name length
pub const MAX_NAME_LENGTH: u64 = 255;

/// Block kind identifiers
pub mod block_kinds {
    pub const TEXT: &str = "Text";
    pub const IMAGE: &str = "Image";
    pub const VIDEO: &str = "Video";
    pub const QUESTION: &str = "Question";

    /// All block kinds
    pub const ALL: &[&str] = &[TEXT, IMAGE, VIDEO, QUESTION];
}

/// Block origin identifiers
pub mod block_origins {
    pub const MANUAL: &str = "manual";
    pub const BULK_IMPORT: &str = "bulk_import";
}

/// Content types accepted for video blocks uploaded through the API
pub const VIDEO_BLOCK_CONTENT_TYPES: &[&str] = &[
    "video/mpg",
    "video/mp2",
    "video/mpeg",
    "video/mpe",
    "video/mpv",
    "video/mp4",
    "video/m4p",
    "video/m4v",
    "video/qt",
    "video/mov",
    "video/wmv",
    "video/flv",
    "video/avi",
    "video/mkv",
    "video/quicktime",
];

// =============================================================================
// BULK IMPORT
// =============================================================================

/// Bulk import column names and accepted remote content types
pub mod bulk_import {
    /// Columns that must be present and non-empty on every row, in check order
    pub const MANDATORY_FIELDS: &[&str] = &[
        "name",
        "description",
        "tile_image",
        "points",
        "priority",
        "category",
        "target",
    ];

    /// Marker for a block type column
    pub const BLOCK_TYPE_MARKER: &str = "block_type";

    /// Marker for a block content column
    pub const BLOCK_MARKER: &str = "block";

    /// Marker for option columns following a question block
    pub const OPTION_MARKER: &str = "option";

    /// Cell value marking an option as correct
    pub const OPTION_CORRECT_VALUE: &str = "true";

    /// Remote image content types accepted by the importer
    pub const IMAGE_CONTENT_TYPES: &[&str] = &[
        "image/bmp",
        "image/gif",
        "image/jpeg",
        "image/png",
        "image/svg+xml",
        "image/tiff",
        "image/webp",
    ];

    /// Remote video content types accepted by the importer
    pub const VIDEO_CONTENT_TYPES: &[&str] = &[
        "video/3gpp",
        "video/mp4",
        "video/mpeg",
        "video/ogg",
        "video/quicktime",
        "video/webm",
        "video/x-m4v",
        "video/ms-asf",
        "video/x-ms-wmv",
        "video/x-msvideo",
    ];
}

// =============================================================================
// SEEDING
// =============================================================================

/// Consecutive unique-conflict failures after which a generator gives up
pub const SEED_MAX_FAILURES: u32 = 10;

/// Password given to generated users
pub const SEED_USER_PASSWORD: &str = "playbook-seed";

/// Stored video referenced by generated video blocks
pub const SEED_VIDEO_PATH: &str = "assignments/videos/sample.mp4";

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
