use httpmock::prelude::*;
use notebookcast_speech::audio;
use notebookcast_speech::providers::melo::{MeloConfig, MeloTTS};
use notebookcast_speech::{
    AudioData, AudioFormat, SpeechRequest, TTSError, TTSSpeechProvider, VoiceIdentifier,
};

fn melo_for(server: &MockServer) -> MeloTTS {
    MeloTTS::new(MeloConfig {
        base_url: server.base_url(),
        timeout_seconds: 5,
        ..MeloConfig::default()
    })
    .expect("client")
}

fn request(text: &str, speaker: &str, language: &str, speed: f32) -> SpeechRequest {
    SpeechRequest {
        text: text.to_string(),
        voice: VoiceIdentifier::new(speaker),
        format: AudioFormat::Wav,
        sample_rate: None,
        language: Some(language.to_string()),
        speed: Some(speed),
    }
}

fn wav_fixture(frames: usize) -> Vec<u8> {
    audio::encode_wav(&AudioData::new(vec![0.1; frames], 1, 44100)).unwrap()
}

#[tokio::test]
async fn test_melo_queue_stream_and_download() {
    let server = MockServer::start_async().await;
    let file_url = server.url("/gradio_api/file=/tmp/gradio/out.wav");

    let queue = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/gradio_api/call/synthesize")
                .body_includes(r#"{"data":["EN-US","hello there",0.9,"EN"]}"#);
            then.status(200).json_body(serde_json::json!({"event_id": "evt-1"}));
        })
        .await;

    let stream_body = format!(
        "event: generating\ndata: null\n\nevent: complete\ndata: [{{\"path\": \"/tmp/gradio/out.wav\", \"url\": \"{file_url}\"}}]\n\n"
    );
    let result = server
        .mock_async(|when, then| {
            when.method(GET).path("/gradio_api/call/synthesize/evt-1");
            then.status(200)
                .header("content-type", "text/event-stream")
                .body(stream_body.as_str());
        })
        .await;

    let download = server
        .mock_async(|when, then| {
            when.method(GET).path("/gradio_api/file=/tmp/gradio/out.wav");
            then.status(200).body(wav_fixture(4410));
        })
        .await;

    let melo = melo_for(&server);
    let response = melo
        .generate_speech(request("hello there", "EN-US", "EN", 0.9))
        .await
        .expect("synthesis should succeed");

    queue.assert_async().await;
    result.assert_async().await;
    download.assert_async().await;
    assert_eq!(response.text, "hello there");
    assert_eq!(response.audio.sample_rate, 44100);
    assert_eq!(response.duration_ms, 100);
}

#[tokio::test]
async fn test_melo_bare_path_resolves_against_file_route() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gradio_api/call/synthesize");
            then.status(200).json_body(serde_json::json!({"event_id": "evt-2"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gradio_api/call/synthesize/evt-2");
            then.status(200)
                .body("event: complete\ndata: [\"/tmp/clip.wav\"]\n\n");
        })
        .await;
    let download = server
        .mock_async(|when, then| {
            when.method(GET).path("/gradio_api/file=/tmp/clip.wav");
            then.status(200).body(wav_fixture(441));
        })
        .await;

    let melo = melo_for(&server);
    let response = melo
        .generate_speech(request("你好", "ZH", "ZH", 1.1))
        .await
        .unwrap();

    download.assert_async().await;
    assert_eq!(response.duration_ms, 10);
}

#[tokio::test]
async fn test_melo_error_event_is_provider_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gradio_api/call/synthesize");
            then.status(200).json_body(serde_json::json!({"event_id": "evt-3"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gradio_api/call/synthesize/evt-3");
            then.status(200).body("event: error\ndata: \"GPU quota exceeded\"\n\n");
        })
        .await;

    let melo = melo_for(&server);
    let err = melo
        .generate_speech(request("hi", "EN-Default", "EN", 1.0))
        .await
        .unwrap_err();

    match err {
        TTSError::ProviderError(msg, provider) => {
            assert!(msg.contains("GPU quota exceeded"));
            assert_eq!(provider, "melotts");
        }
        other => panic!("Expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_melo_queue_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/gradio_api/call/synthesize");
            then.status(503).body("sleeping");
        })
        .await;

    let melo = melo_for(&server);
    let err = melo
        .generate_speech(request("hi", "EN-Default", "EN", 1.0))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}
