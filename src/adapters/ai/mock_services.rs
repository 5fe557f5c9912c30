//! Mock AI services for testing.
//!
//! Configurable implementations of the `RoomAnalyzer`, `RoomSynthesizer`, and
//! `AssistantChat` ports so tests run without calling a real AI API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - A sensible default once the queue is empty
//! - Simulated latency for concurrency tests
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let analyzer = MockRoomAnalyzer::new();
//! analyzer.push_failure(ServiceFailure::new("not a room"));
//!
//! let err = analyzer.analyze(&image, DesignStyle::Modern).await.unwrap_err();
//! assert_eq!(analyzer.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::redesign::{
    DesignStyle, ImageFormat, RoomAnalysis, RoomImage, ServiceFailure,
};
use crate::ports::{AssistantChat, RoomAnalyzer, RoomSynthesizer};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Recorded analyzer invocation.
#[derive(Debug, Clone)]
pub struct AnalysisCall {
    pub image: RoomImage,
    pub style: DesignStyle,
}

/// Mock room analyzer.
#[derive(Debug, Default)]
pub struct MockRoomAnalyzer {
    responses: Mutex<VecDeque<Result<RoomAnalysis, ServiceFailure>>>,
    calls: Mutex<Vec<AnalysisCall>>,
    delay: Mutex<Duration>,
}

impl MockRoomAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful analysis.
    pub fn push_success(&self, analysis: RoomAnalysis) {
        lock(&self.responses).push_back(Ok(analysis));
    }

    /// Queues a raw failure.
    pub fn push_failure(&self, failure: ServiceFailure) {
        lock(&self.responses).push_back(Err(failure));
    }

    /// Sets simulated latency per request.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = delay;
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<AnalysisCall> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> Result<RoomAnalysis, ServiceFailure> {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(default_analysis)
    }
}

fn default_analysis() -> Result<RoomAnalysis, ServiceFailure> {
    RoomAnalysis::new(
        "living room",
        "Soft daylight from a single window",
        vec![
            "Add layered lighting".to_string(),
            "Declutter the shelving".to_string(),
        ],
    )
    .map_err(|e| ServiceFailure::new(e.to_string()))
}

#[async_trait]
impl RoomAnalyzer for MockRoomAnalyzer {
    async fn analyze(
        &self,
        image: &RoomImage,
        style: DesignStyle,
    ) -> Result<RoomAnalysis, ServiceFailure> {
        lock(&self.calls).push(AnalysisCall {
            image: image.clone(),
            style,
        });

        let delay = *lock(&self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        self.next_response()
    }
}

/// Recorded synthesizer invocation.
#[derive(Debug, Clone)]
pub struct SynthesisCall {
    pub image: RoomImage,
    pub style: DesignStyle,
    pub analysis: RoomAnalysis,
}

/// Mock room synthesizer.
#[derive(Debug, Default)]
pub struct MockRoomSynthesizer {
    responses: Mutex<VecDeque<Result<RoomImage, ServiceFailure>>>,
    calls: Mutex<Vec<SynthesisCall>>,
    delay: Mutex<Duration>,
}

impl MockRoomSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&self, image: RoomImage) {
        lock(&self.responses).push_back(Ok(image));
    }

    pub fn push_failure(&self, failure: ServiceFailure) {
        lock(&self.responses).push_back(Err(failure));
    }

    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = delay;
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<SynthesisCall> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> Result<RoomImage, ServiceFailure> {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            RoomImage::new(ImageFormat::Png, b"mock-redesign".to_vec())
                .map_err(|e| ServiceFailure::new(e.to_string()))
        })
    }
}

#[async_trait]
impl RoomSynthesizer for MockRoomSynthesizer {
    async fn synthesize(
        &self,
        image: &RoomImage,
        style: DesignStyle,
        analysis: &RoomAnalysis,
    ) -> Result<RoomImage, ServiceFailure> {
        lock(&self.calls).push(SynthesisCall {
            image: image.clone(),
            style,
            analysis: analysis.clone(),
        });

        let delay = *lock(&self.delay);
        if !delay.is_zero() {
            sleep(delay).await;
        }

        self.next_response()
    }
}

/// Mock design assistant. Echoes the message unless a response is queued.
#[derive(Debug, Default)]
pub struct MockAssistant {
    responses: Mutex<VecDeque<Result<String, ServiceFailure>>>,
    messages: Mutex<Vec<String>>,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_success(&self, reply: impl Into<String>) {
        lock(&self.responses).push_back(Ok(reply.into()));
    }

    pub fn push_failure(&self, failure: ServiceFailure) {
        lock(&self.responses).push_back(Err(failure));
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

#[async_trait]
impl AssistantChat for MockAssistant {
    async fn reply(&self, message: &str) -> Result<String, ServiceFailure> {
        lock(&self.messages).push(message.to_string());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(format!("You asked: {}", message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> RoomImage {
        RoomImage::new(ImageFormat::Jpeg, vec![1, 2, 3]).unwrap()
    }

    #[tokio::test]
    async fn analyzer_returns_queued_responses_in_order() {
        let analyzer = MockRoomAnalyzer::new();
        analyzer.push_success(RoomAnalysis::new("kitchen", "dim", vec![]).unwrap());
        analyzer.push_failure(ServiceFailure::new("second fails"));

        let first = analyzer.analyze(&photo(), DesignStyle::Modern).await.unwrap();
        let second = analyzer.analyze(&photo(), DesignStyle::Modern).await;

        assert_eq!(first.room_type(), "kitchen");
        assert_eq!(second.unwrap_err().message, "second fails");
    }

    #[tokio::test]
    async fn analyzer_falls_back_to_default() {
        let analyzer = MockRoomAnalyzer::new();
        let analysis = analyzer.analyze(&photo(), DesignStyle::Luxury).await.unwrap();
        assert_eq!(analysis.room_type(), "living room");
        assert_eq!(analyzer.calls()[0].style, DesignStyle::Luxury);
    }

    #[tokio::test]
    async fn synthesizer_tracks_calls() {
        let synthesizer = MockRoomSynthesizer::new();
        let analysis = RoomAnalysis::new("bedroom", "warm", vec![]).unwrap();

        assert_eq!(synthesizer.call_count(), 0);
        let image = synthesizer
            .synthesize(&photo(), DesignStyle::Japandi, &analysis)
            .await
            .unwrap();

        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(synthesizer.call_count(), 1);
        assert_eq!(synthesizer.calls()[0].analysis, analysis);
    }

    #[tokio::test]
    async fn assistant_echoes_by_default_and_records_messages() {
        let assistant = MockAssistant::new();
        assistant.push_failure(ServiceFailure::new("overloaded"));

        assert!(assistant.reply("first").await.is_err());
        assert_eq!(assistant.reply("second").await.unwrap(), "You asked: second");
        assert_eq!(assistant.messages(), vec!["first", "second"]);
    }
}
