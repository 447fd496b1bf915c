//! End-to-end pipeline tests with scripted backends and recording collaborators

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use email_automation::{
    AutomationError, Category, ChatBackend, ChatMessage, Dispatcher, Email, EmailAutomationSystem,
    EmailClassifier, FeedbackLog, LlmConfig, LlmGateway, Messaging, ResponseGenerator, Result,
    RetryConfig, RetryDelay, Services, Ticketing,
};

/// Backend that replays a scripted sequence of replies
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: AtomicU32,
}

impl ScriptedBackend {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicU32::new(0),
        })
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        _model: &str,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AutomationError::Backend("script exhausted".to_string())))
    }
}

/// Deterministic backend: classification then response, repeatable forever
struct DeterministicBackend {
    category: String,
    response: String,
    next_is_classification: Mutex<bool>,
}

impl DeterministicBackend {
    fn new(category: &str, response: &str) -> Arc<Self> {
        Arc::new(Self {
            category: category.to_string(),
            response: response.to_string(),
            next_is_classification: Mutex::new(true),
        })
    }
}

#[async_trait]
impl ChatBackend for DeterministicBackend {
    async fn complete(
        &self,
        _model: &str,
        _messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String> {
        let mut flag = self.next_is_classification.lock().unwrap();
        let reply = if *flag {
            self.category.clone()
        } else {
            self.response.clone()
        };
        *flag = !*flag;
        Ok(reply)
    }
}

/// Delay stub that records requested durations instead of sleeping
struct RecordingDelay {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            slept: Mutex::new(Vec::new()),
        })
    }

    fn durations(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl RetryDelay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
struct CallLog {
    urgent_tickets: Vec<String>,
    support_tickets: Vec<String>,
    complaint_responses: Vec<String>,
    standard_responses: Vec<String>,
    feedback_entries: Vec<String>,
}

/// Recording collaborators; optionally fail ticket creation
struct RecordingServices {
    log: Mutex<CallLog>,
    fail_tickets: bool,
}

impl RecordingServices {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(CallLog::default()),
            fail_tickets: false,
        })
    }

    fn failing_tickets() -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(CallLog::default()),
            fail_tickets: true,
        })
    }
}

#[async_trait]
impl Ticketing for RecordingServices {
    async fn create_urgent_ticket(&self, email_id: &str, _context: &str) -> Result<()> {
        if self.fail_tickets {
            return Err(AutomationError::Service(
                "ticketing system unavailable".to_string(),
            ));
        }
        self.log.lock().unwrap().urgent_tickets.push(email_id.to_string());
        Ok(())
    }

    async fn create_support_ticket(&self, email_id: &str, _context: &str) -> Result<()> {
        if self.fail_tickets {
            return Err(AutomationError::Service(
                "ticketing system unavailable".to_string(),
            ));
        }
        self.log.lock().unwrap().support_tickets.push(email_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl Messaging for RecordingServices {
    async fn send_complaint_response(&self, email_id: &str, _response: &str) -> Result<()> {
        self.log.lock().unwrap().complaint_responses.push(email_id.to_string());
        Ok(())
    }

    async fn send_standard_response(&self, email_id: &str, _response: &str) -> Result<()> {
        self.log.lock().unwrap().standard_responses.push(email_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl FeedbackLog for RecordingServices {
    async fn log_customer_feedback(&self, email_id: &str, _feedback: &str) -> Result<()> {
        self.log.lock().unwrap().feedback_entries.push(email_id.to_string());
        Ok(())
    }
}

fn services_from(recorder: Arc<RecordingServices>) -> Services {
    Services {
        ticketing: recorder.clone(),
        messaging: recorder.clone(),
        feedback: recorder,
    }
}

fn build_system(backend: Arc<dyn ChatBackend>, services: Services) -> EmailAutomationSystem {
    let retry = RetryConfig {
        max_attempts: 1,
        initial_backoff_secs: 0.001,
    };
    let llm = LlmConfig::default();
    let gateway = Arc::new(LlmGateway::new(backend, &retry));
    EmailAutomationSystem::new(
        EmailClassifier::new(gateway.clone(), &llm),
        ResponseGenerator::new(gateway, &llm),
        Dispatcher::new(services),
    )
}

fn email(id: &str, subject: &str, body: &str) -> Email {
    Email {
        id: id.to_string(),
        sender: format!("{}@example.com", id),
        subject: subject.to_string(),
        body: body.to_string(),
        timestamp: None,
    }
}

#[tokio::test]
async fn batch_returns_one_result_per_email_in_input_order() {
    let backend = ScriptedBackend::new(vec![
        Ok("complaint".to_string()),
        Ok("We're sorry...".to_string()),
        Ok("inquiry".to_string()),
        Ok("Happy to help.".to_string()),
        Ok("feedback".to_string()),
        Ok("Thank you!".to_string()),
    ]);
    let system = build_system(backend, services_from(RecordingServices::new()));

    let emails = vec![
        email("001", "Broken product", "Refund me"),
        email("002", "Question", "Is it compatible?"),
        email("003", "Thanks", "Great support"),
    ];
    let results = system.process_batch(&emails).await;

    assert_eq!(results.len(), 3);
    let ids: Vec<_> = results.iter().map(|r| r.email_id.as_str()).collect();
    assert_eq!(ids, ["001", "002", "003"]);
}

#[tokio::test]
async fn success_implies_response_sent_and_no_error() {
    let backend = ScriptedBackend::new(vec![
        Ok("other".to_string()),
        Ok("Thanks for writing in.".to_string()),
    ]);
    let system = build_system(backend, services_from(RecordingServices::new()));

    let result = system.process(&email("005", "Partnership", "Call next week?")).await;

    assert!(result.success);
    assert!(result.response_sent);
    assert!(result.error.is_none());
    assert_eq!(result.classification, Some(Category::Other));
}

#[tokio::test]
async fn complaint_scenario_triggers_urgent_ticket_and_complaint_response() {
    let backend = ScriptedBackend::new(vec![
        Ok("complaint".to_string()),
        Ok("We're sorry...".to_string()),
    ]);
    let recorder = RecordingServices::new();
    let system = build_system(backend, services_from(recorder.clone()));

    let result = system
        .process(&email("001", "Broken product received", "It arrived damaged"))
        .await;

    assert_eq!(result.classification, Some(Category::Complaint));
    assert!(result.response_sent);
    assert!(result.success);

    let log = recorder.log.lock().unwrap();
    assert_eq!(log.urgent_tickets, vec!["001"]);
    assert_eq!(log.complaint_responses, vec!["001"]);
    assert!(log.standard_responses.is_empty());
    assert!(log.support_tickets.is_empty());
}

#[tokio::test]
async fn invalid_category_reports_classification_failed() {
    let backend = ScriptedBackend::new(vec![Ok("URGENT!!".to_string())]);
    let recorder = RecordingServices::new();
    let system = build_system(backend.clone(), services_from(recorder.clone()));

    let result = system.process(&email("001", "Broken product", "Refund me")).await;

    assert!(!result.success);
    assert!(result.classification.is_none());
    assert_eq!(result.error.as_deref(), Some("Classification failed"));
    // Pipeline short-circuits: no response generation, no handler
    assert_eq!(backend.call_count(), 1);
    assert!(recorder.log.lock().unwrap().standard_responses.is_empty());
}

#[tokio::test]
async fn handler_failure_is_absorbed_and_reported() {
    let backend = ScriptedBackend::new(vec![
        Ok("support_request".to_string()),
        Ok("We're on it.".to_string()),
        Ok("inquiry".to_string()),
        Ok("Happy to help.".to_string()),
    ]);
    let system = build_system(backend, services_from(RecordingServices::failing_tickets()));

    let emails = vec![
        email("004", "Need help", "Error 5123"),
        email("002", "Question", "Compatible?"),
    ];
    let results = system.process_batch(&emails).await;

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert!(!results[0].response_sent);
    let error = results[0].error.as_deref().unwrap();
    assert!(error.starts_with("Handler error:"));
    assert!(error.contains("ticketing system unavailable"));
    // The failing handler must not affect the next email
    assert!(results[1].success);
}

#[tokio::test]
async fn process_is_idempotent_with_deterministic_backend() {
    let input = email("002", "Question about product specifications", "Mac OS?");

    let first = {
        let backend = DeterministicBackend::new("inquiry", "Happy to help.");
        let system = build_system(backend, services_from(RecordingServices::new()));
        system.process(&input).await
    };
    let second = {
        let backend = DeterministicBackend::new("inquiry", "Happy to help.");
        let system = build_system(backend, services_from(RecordingServices::new()));
        system.process(&input).await
    };

    assert_eq!(first, second);
}

#[tokio::test]
async fn gateway_retries_through_transient_failures() {
    let backend = ScriptedBackend::new(vec![
        Err(AutomationError::Backend("flaky 1".to_string())),
        Err(AutomationError::Backend("flaky 2".to_string())),
        Ok("feedback".to_string()),
        Ok("Thank you!".to_string()),
    ]);
    let delay = RecordingDelay::new();
    let retry = RetryConfig {
        max_attempts: 3,
        initial_backoff_secs: 1.5,
    };
    let llm = LlmConfig::default();
    let gateway = Arc::new(LlmGateway::with_delay(backend.clone(), &retry, delay.clone()));
    let system = EmailAutomationSystem::new(
        EmailClassifier::new(gateway.clone(), &llm),
        ResponseGenerator::new(gateway, &llm),
        Dispatcher::new(services_from(RecordingServices::new())),
    );

    let result = system.process(&email("003", "Thanks", "Great support")).await;

    // Two transient failures stay invisible to the caller
    assert!(result.success);
    assert_eq!(result.classification, Some(Category::Feedback));
    assert_eq!(backend.call_count(), 4);
    assert_eq!(
        delay.durations(),
        vec![Duration::from_secs_f64(1.5), Duration::from_secs_f64(3.0)]
    );
}

#[tokio::test]
async fn exhausted_retries_surface_as_classification_failure() {
    // Backend never succeeds; the script default is a backend error
    let backend = ScriptedBackend::new(vec![]);
    let delay = RecordingDelay::new();
    let retry = RetryConfig {
        max_attempts: 3,
        initial_backoff_secs: 1.5,
    };
    let llm = LlmConfig::default();
    let gateway = Arc::new(LlmGateway::with_delay(backend.clone(), &retry, delay.clone()));
    let system = EmailAutomationSystem::new(
        EmailClassifier::new(gateway.clone(), &llm),
        ResponseGenerator::new(gateway, &llm),
        Dispatcher::new(services_from(RecordingServices::new())),
    );

    let result = system.process(&email("001", "Broken product", "Refund me")).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Classification failed"));
    // Exactly max_attempts calls, delays only between attempts
    assert_eq!(backend.call_count(), 3);
    assert_eq!(delay.durations().len(), 2);
}
