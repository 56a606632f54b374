/*!
 * Tests for the track file wrapper contract
 */

use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;
use emptydcst::errors::WrapperError;
use emptydcst::track_file::{EncryptionKey, TrackFileJob, TrackFileWrapper, WRAPPER_BINARY};

fn job() -> TrackFileJob {
    TrackFileJob {
        track_id: Uuid::from_u128(42),
        key: None,
        duration: 24,
        frame_rate: "24".to_string(),
        reel_number: 1,
        document_path: PathBuf::from("/tmp/out/doc_r1.xml"),
        output_dir: PathBuf::from("/tmp/out"),
    }
}

#[test]
fn test_outputPath_withReelNumber_shouldUseTrackUuid() {
    let job = job();
    assert_eq!(
        job.output_path(),
        PathBuf::from(format!("/tmp/out/{}_r1_sub.mxf", Uuid::from_u128(42)))
    );
}

#[test]
fn test_arguments_withEncryption_shouldCarryKeyMaterial() {
    let key = EncryptionKey::generate();
    let mut job = job();
    job.key = Some(key.clone());

    let args = job.arguments();
    assert_eq!(&args[..5], &["-L".to_string(), "-j".to_string(), key.key_id.to_string(), "-k".to_string(), key.key.clone()]);
    assert_eq!(args.len(), 13);
    assert_eq!(args[args.len() - 2], "/tmp/out/doc_r1.xml");
}

#[test]
fn test_arguments_withoutEncryption_shouldNotMentionKeys() {
    let args = job().arguments();
    assert!(!args.contains(&"-j".to_string()));
    assert!(!args.contains(&"-k".to_string()));
    assert_eq!(args.len(), 9);
}

#[test]
fn test_default_shouldTargetAsdcpWrapWithoutTimeout() {
    let wrapper = TrackFileWrapper::default();
    assert_eq!(wrapper.binary(), PathBuf::from(WRAPPER_BINARY).as_path());
    assert_eq!(wrapper.timeout(), None);
}

#[test]
fn test_isAvailable_withMissingBinary_shouldReturnFalse() {
    let wrapper = TrackFileWrapper::new("emptydcst-no-such-wrapper", Some(Duration::from_secs(1)));
    assert!(!wrapper.is_available());
}

#[tokio::test]
async fn test_wrap_withMissingBinary_shouldReportUnavailable() {
    let wrapper = TrackFileWrapper::new("emptydcst-no-such-wrapper", None);
    match wrapper.wrap(&job()).await {
        Err(WrapperError::Unavailable(name)) => assert_eq!(name, "emptydcst-no-such-wrapper"),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}
