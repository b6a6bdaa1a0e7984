//! Tests for the OTP service state machine

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DeliveryError, OtpError};
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};
use crate::services::otp::config::OtpServiceConfig;
use crate::services::otp::service::OtpService;
use crate::services::otp::sweeper::{OtpSweeper, SweeperConfig};

use super::mocks::MockSmsChannel;

type TestService = OtpService<MockSmsChannel, InMemoryOtpStore>;

fn service_with_config(
    config: OtpServiceConfig,
) -> (Arc<TestService>, Arc<MockSmsChannel>, Arc<InMemoryOtpStore>) {
    let sms = Arc::new(MockSmsChannel::new());
    let store = Arc::new(InMemoryOtpStore::new());
    let service = Arc::new(OtpService::new(sms.clone(), store.clone(), config));
    (service, sms, store)
}

fn default_service() -> (Arc<TestService>, Arc<MockSmsChannel>, Arc<InMemoryOtpStore>) {
    service_with_config(OtpServiceConfig::default())
}

#[tokio::test]
async fn issue_normalizes_subject_and_sends_six_digits() {
    let (service, sms, _store) = default_service();

    let outcome = service.issue("9876543210").await.unwrap();
    assert_eq!(outcome.phone, "+9876543210");
    assert_eq!(outcome.expires_in_seconds, 300);
    assert!(outcome.message_id.starts_with("mock-msg-"));

    let code = sms.sent_code("+9876543210").unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn issue_rejects_malformed_subjects() {
    let (service, _sms, store) = default_service();

    assert_eq!(service.issue("12345").await.unwrap_err(), OtpError::InvalidSubject);
    assert_eq!(service.issue("").await.unwrap_err(), OtpError::InvalidSubject);
    assert_eq!(
        service.issue("1234567890123456").await.unwrap_err(),
        OtpError::InvalidSubject
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn issue_then_verify_consumes_the_record() {
    let (service, sms, store) = default_service();

    service.issue("987-654-3210").await.unwrap();
    let code = sms.sent_code("+9876543210").unwrap();

    service.verify("9876543210", &code).await.unwrap();
    assert!(store.is_empty().await);

    // Consumed codes collapse back to NoRecord
    assert_eq!(
        service.verify("9876543210", &code).await.unwrap_err(),
        OtpError::NotFound
    );
}

#[tokio::test]
async fn reissue_within_window_is_throttled() {
    let (service, _sms, _store) = default_service();

    service.issue("9876543210").await.unwrap();
    match service.issue("9876543210").await.unwrap_err() {
        OtpError::Throttled {
            retry_after_seconds,
        } => {
            assert!(retry_after_seconds > 0);
            assert!(retry_after_seconds <= 300);
        }
        other => panic!("expected throttle, got {:?}", other),
    }
}

#[tokio::test]
async fn wrong_code_consumes_attempts_until_exhaustion() {
    let (service, sms, store) = default_service();

    service.issue("9876543210").await.unwrap();
    let code = sms.sent_code("+9876543210").unwrap();

    assert_eq!(
        service.verify("9876543210", "000000").await.unwrap_err(),
        OtpError::InvalidCode {
            remaining_attempts: 2
        }
    );
    assert_eq!(
        service.verify("9876543210", "000000").await.unwrap_err(),
        OtpError::InvalidCode {
            remaining_attempts: 1
        }
    );
    assert_eq!(
        service.verify("9876543210", "000000").await.unwrap_err(),
        OtpError::InvalidCode {
            remaining_attempts: 0
        }
    );

    // Budget exhausted: even the correct code is refused and the record removed
    assert_eq!(
        service.verify("9876543210", &code).await.unwrap_err(),
        OtpError::AttemptsExhausted
    );
    assert!(store.is_empty().await);

    assert_eq!(
        service.verify("9876543210", &code).await.unwrap_err(),
        OtpError::NotFound
    );
}

#[tokio::test]
async fn failed_attempts_still_allow_success_within_budget() {
    let (service, sms, store) = default_service();

    service.issue("9876543210").await.unwrap();
    let code = sms.sent_code("+9876543210").unwrap();

    let _ = service.verify("9876543210", "000000").await;
    let _ = service.verify("9876543210", "111111").await;

    service.verify("9876543210", &code).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn expired_code_is_refused_and_removed() {
    let (service, sms, store) = service_with_config(OtpServiceConfig {
        expiration_minutes: 0,
        ..OtpServiceConfig::default()
    });

    service.issue("9876543210").await.unwrap();
    let code = sms.sent_code("+9876543210").unwrap();

    // Cross the zero-length validity window
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    assert_eq!(
        service.verify("9876543210", &code).await.unwrap_err(),
        OtpError::Expired
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn expired_code_does_not_block_reissue() {
    let (service, _sms, _store) = service_with_config(OtpServiceConfig {
        expiration_minutes: 0,
        ..OtpServiceConfig::default()
    });

    service.issue("9876543210").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    // Outstanding record has expired, so issuance is allowed again
    service.issue("9876543210").await.unwrap();
}

#[tokio::test]
async fn delivery_failure_keeps_record_and_throttles() {
    let sms = Arc::new(MockSmsChannel::failing_with(DeliveryError::Failed));
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(sms, store.clone(), OtpServiceConfig::default());

    assert_eq!(
        service.issue("9876543210").await.unwrap_err(),
        OtpError::DeliveryFailed(DeliveryError::Failed)
    );

    // The record was stored before delivery and is not rolled back
    assert_eq!(store.len().await, 1);
    assert!(matches!(
        service.issue("9876543210").await.unwrap_err(),
        OtpError::Throttled { .. }
    ));
}

#[tokio::test]
async fn delivery_error_kinds_surface_to_the_caller() {
    let sms = Arc::new(MockSmsChannel::failing_with(DeliveryError::NotMobile));
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(sms, store, OtpServiceConfig::default());

    let err = service.issue("9876543210").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Phone number is not a valid mobile number"
    );
}

#[tokio::test]
async fn sweep_removes_exactly_the_expired_records() {
    let (service, _sms, store) = default_service();
    let now = Utc::now();

    for i in 0..3 {
        let phone = format!("+100000000{}", i);
        let record = OtpRecord {
            phone: phone.clone(),
            code: "123456".to_string(),
            attempts: 0,
            created_at: now - Duration::minutes(10),
            expires_at: now - Duration::minutes(5),
        };
        store.put(&phone, record).await.unwrap();
    }
    for i in 0..2 {
        let phone = format!("+200000000{}", i);
        let record = OtpRecord::new(phone.clone(), "654321".to_string(), Duration::minutes(5));
        store.put(&phone, record).await.unwrap();
    }

    let removed = service.sweep_expired().await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(store.len().await, 2);

    // A second sweep finds nothing left to purge
    assert_eq!(service.sweep_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn sweeper_task_starts_and_stops_cleanly() {
    let (service, _sms, store) = default_service();
    let now = Utc::now();

    let record = OtpRecord {
        phone: "+9876543210".to_string(),
        code: "123456".to_string(),
        attempts: 0,
        created_at: now - Duration::minutes(10),
        expires_at: now - Duration::minutes(5),
    };
    store.put("+9876543210", record).await.unwrap();

    let sweeper = OtpSweeper::new(
        service,
        SweeperConfig {
            interval_seconds: 3600,
            enabled: true,
        },
    );
    let handle = sweeper.start();

    // First tick fires immediately; give the task a moment to run it
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(store.is_empty().await);

    handle.stop().await;
}

#[tokio::test]
async fn disabled_sweeper_spawns_no_task() {
    let (service, _sms, _store) = default_service();
    let sweeper = OtpSweeper::new(
        service,
        SweeperConfig {
            interval_seconds: 1,
            enabled: false,
        },
    );
    // stop() must return immediately when nothing was spawned
    sweeper.start().stop().await;
}
