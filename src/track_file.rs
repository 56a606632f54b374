/*!
 * MXF track-file creation through the external `asdcp-wrap` tool.
 *
 * The wrapper is probed on the search path before use and run as a child
 * process. By default the run waits for the wrapper indefinitely, the same as
 * a plain blocking call; a timeout can be set, in which case the child is
 * killed once it expires.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use uuid::Uuid;

use crate::errors::WrapperError;

/// Wrapper executable looked up on the search path
pub const WRAPPER_BINARY: &str = "asdcp-wrap";

/// Suffix of generated track-file names
pub const TRACK_FILE_SUFFIX: &str = "_sub.mxf";

/// Content key material for an encrypted track file. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptionKey {
    /// Key identifier handed to the wrapper
    pub key_id: Uuid,
    /// 16 random bytes, lowercase hex
    pub key: String,
}

impl EncryptionKey {
    /// Fresh key identifier and random 16-byte key
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self {
            key_id: Uuid::new_v4(),
            key: bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        }
    }
}

/// Everything the wrapper needs for one reel
#[derive(Debug, Clone)]
pub struct TrackFileJob {
    pub track_id: Uuid,
    pub key: Option<EncryptionKey>,
    pub duration: u32,
    pub frame_rate: String,
    pub reel_number: u32,
    /// Rendered subtitle document
    pub document_path: PathBuf,
    pub output_dir: PathBuf,
}

impl TrackFileJob {
    /// `<output>/<track uuid>_r<reel>_sub.mxf`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_r{}{}",
            self.track_id, self.reel_number, TRACK_FILE_SUFFIX
        ))
    }

    /// Wrapper arguments: `-L [-j id -k key] -a track -d duration -p rate input output`
    pub fn arguments(&self) -> Vec<String> {
        let mut args = vec!["-L".to_string()];
        if let Some(key) = &self.key {
            args.extend(["-j".to_string(), key.key_id.to_string(), "-k".to_string(), key.key.clone()]);
        }
        args.extend([
            "-a".to_string(),
            self.track_id.to_string(),
            "-d".to_string(),
            self.duration.to_string(),
            "-p".to_string(),
            self.frame_rate.clone(),
            self.document_path.to_string_lossy().to_string(),
            self.output_path().to_string_lossy().to_string(),
        ]);
        args
    }
}

/// Runs the track-file wrapper
#[derive(Debug, Clone)]
pub struct TrackFileWrapper {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl Default for TrackFileWrapper {
    fn default() -> Self {
        Self::new(WRAPPER_BINARY, None)
    }
}

impl TrackFileWrapper {
    /// Wrapper by name (searched on PATH) or path, with an optional time limit
    pub fn new<P: AsRef<Path>>(binary: P, timeout: Option<Duration>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            timeout,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether the wrapper can be found
    pub fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    /// Resolve the wrapper or report it as unavailable
    pub fn locate(&self) -> Result<PathBuf, WrapperError> {
        which::which(&self.binary)
            .map_err(|_| WrapperError::Unavailable(self.binary.to_string_lossy().to_string()))
    }

    /// Run the wrapper for a job and return the track-file path
    pub async fn wrap(&self, job: &TrackFileJob) -> Result<PathBuf, WrapperError> {
        let binary = self.locate()?;
        let args = job.arguments();
        debug!("Running {:?} {}", binary, args.join(" "));

        let output_future = Command::new(&binary).args(&args).kill_on_drop(true).output();

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output_future)
                .await
                .map_err(|_| WrapperError::TimedOut(limit.as_secs()))?,
            None => output_future.await,
        };
        let output = result.map_err(|e| WrapperError::Execution(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WrapperError::Execution(format!(
                "{} ({})",
                stderr.trim(),
                output.status
            )));
        }

        let track_file = job.output_path();
        info!("Track file written: {:?}", track_file);
        Ok(track_file)
    }
}
