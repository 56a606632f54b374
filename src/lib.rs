/*!
 * # emptydcst - minimal D-Cinema subtitle reels
 *
 * A Rust library for synthesizing minimal SMPTE ST 428-7 (DCST) subtitle
 * documents and wrapping them into MXF track files.
 *
 * ## Features
 *
 * - Text profile reels with an embedded font reference
 * - Image profile reels with a transparent PNG placeholder
 * - MainSubtitle and ClosedCaption display types
 * - Global properties reused from an existing 2010 or 2014 DCST document
 * - Frame-accurate SMPTE timecodes, fractional rates included
 * - Optional (encrypted) track file creation through asdcp-wrap
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: frame count and HH:MM:SS:FF conversions
 * - `dcst`: the subtitle reel model:
 *   - `dcst::model`: reel entity graph
 *   - `dcst::render`: XML encoding
 *   - `dcst::template`: template loading and namespace checks
 * - `synthesis`: building a reel from defaults and template overrides
 * - `assets`: font resource and placeholder image
 * - `track_file`: the external track file wrapper
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO 639 checks for language tags
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assets;
pub mod dcst;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod synthesis;
pub mod timecode;
pub mod track_file;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions, RunOutcome};
pub use dcst::{parse_template, render, DisplayType, SubtitleReel};
pub use errors::{RenderError, TemplateError, TimecodeError, WrapperError};
pub use synthesis::{Profile, RunContext, SynthesisRequest, Synthesizer};
pub use timecode::Timecode;
pub use track_file::{EncryptionKey, TrackFileWrapper};
