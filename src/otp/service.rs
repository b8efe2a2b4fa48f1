use crate::otp::model::OtpEntry;
use crate::utils::email::Notifier;
use crate::utils::error::CustomError;
use crate::utils::helpers::generate_otp_code;
use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// OTP expiry window
const OTP_EXPIRY_SECS: i64 = 10 * 60;
/// Minimum gap between two issue requests for the same email
const RESEND_COOLDOWN_SECS: i64 = 30;

/// In-memory OTP lifecycle for email verification.
///
/// Per email the entry moves `NoEntry -> Issued -> Verified`, where a failed
/// or expired check allows re-issue after the cooldown and `Verified` holds
/// until explicitly cleared. Expired entries are pruned lazily at the next
/// verification lookup; no background sweeper runs.
pub struct OtpService {
    notifier: Arc<dyn Notifier>,
    store: Mutex<HashMap<String, OtpEntry>>,
    verified_emails: Mutex<HashSet<String>>,
}

impl OtpService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            store: Mutex::new(HashMap::new()),
            verified_emails: Mutex::new(HashSet::new()),
        }
    }

    /// Generate and deliver an OTP for the given email, replacing any
    /// previous entry. The cooldown applies regardless of whether the
    /// previous code has expired.
    pub async fn generate_and_send_otp(&self, raw_email: &str) -> Result<String, CustomError> {
        if raw_email.trim().is_empty() {
            return Err(CustomError::InvalidInputError(
                "Email cannot be empty".to_string(),
            ));
        }

        let email = normalize(raw_email);
        let code = {
            let mut store = self.store.lock().await;
            let now = Utc::now();

            if let Some(existing) = store.get(&email) {
                let remaining = remaining_cooldown_secs(existing.issued_at, now);
                if remaining > 0 {
                    return Err(CustomError::CooldownActiveError(remaining));
                }
            }

            let code = generate_otp_code();
            store.insert(
                email.clone(),
                OtpEntry {
                    code: code.clone(),
                    issued_at: now,
                },
            );
            code
        };

        // Delivery failure does not roll back issuance; the stored code
        // stays valid and may still reach the user through another channel.
        let message = format!("Your OTP is: {}. It is valid for 10 minutes.", code);
        if let Err(e) = self.notifier.send_code(&email, &message).await {
            error!("Failed to send OTP email to {}: {}", email, e);
        }

        info!("OTP issued for {}", email);
        Ok(code)
    }

    /// Check a submitted code. Success consumes the entry and marks the
    /// email verified; failure leaves an unexpired entry in place for retry.
    pub async fn verify_otp(&self, raw_email: &str, code: &str) -> bool {
        if raw_email.trim().is_empty() || code.is_empty() {
            return false;
        }

        let email = normalize(raw_email);
        let now = Utc::now();

        let mut store = self.store.lock().await;
        let Some(entry) = store.get(&email) else {
            warn!("OTP verification failed for {}", email);
            return false;
        };

        if now - entry.issued_at >= Duration::seconds(OTP_EXPIRY_SECS) {
            store.remove(&email);
            warn!("OTP verification failed for {}: code expired", email);
            return false;
        }

        if entry.code != code {
            warn!("OTP verification failed for {}", email);
            return false;
        }

        store.remove(&email); // One-time use
        drop(store);

        self.verified_emails.lock().await.insert(email.clone());
        info!("OTP verified for {}", email);
        true
    }

    /// Whether the email's most recent OTP check succeeded.
    pub async fn is_email_verified(&self, raw_email: &str) -> bool {
        self.verified_emails
            .lock()
            .await
            .contains(&normalize(raw_email))
    }

    /// Drop the verified flag and any stored entry once the email's
    /// registration workflow has completed.
    pub async fn clear_email_verification(&self, raw_email: &str) {
        let email = normalize(raw_email);
        self.verified_emails.lock().await.remove(&email);
        self.store.lock().await.remove(&email);
    }

    /// Whole seconds left before a new code may be requested; 0 when no
    /// entry exists or the cooldown has elapsed.
    pub async fn remaining_cooldown(&self, raw_email: &str) -> u64 {
        let email = normalize(raw_email);
        let store = self.store.lock().await;
        match store.get(&email) {
            Some(entry) => remaining_cooldown_secs(entry.issued_at, Utc::now()),
            None => 0,
        }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn remaining_cooldown_secs(issued_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let elapsed = (now - issued_at).num_seconds();
    if elapsed < RESEND_COOLDOWN_SECS {
        (RESEND_COOLDOWN_SECS - elapsed) as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    struct RecordingNotifier {
        sent: StdMutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: StdMutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_code(&self, destination: &str, message: &str) -> Result<(), CustomError> {
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), message.to_string()));
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send_code(&self, _destination: &str, _message: &str) -> Result<(), CustomError> {
            Err(CustomError::DeliveryFailureError("smtp down".to_string()))
        }
    }

    async fn backdate(svc: &OtpService, email: &str, secs: i64) {
        let mut store = svc.store.lock().await;
        let entry = store.get_mut(email).unwrap();
        entry.issued_at -= Duration::seconds(secs);
    }

    #[actix_web::test]
    async fn empty_email_is_rejected() {
        let svc = OtpService::new(RecordingNotifier::new());
        let err = svc.generate_and_send_otp("   ").await.unwrap_err();
        assert!(matches!(err, CustomError::InvalidInputError(..)));
    }

    #[actix_web::test]
    async fn issue_delivers_a_six_digit_code() {
        let notifier = RecordingNotifier::new();
        let svc = OtpService::new(notifier.clone());

        let code = svc.generate_and_send_otp("A@B.com").await.unwrap();
        assert_eq!(code.len(), 6);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        // Delivery goes to the normalized address
        assert_eq!(sent[0].0, "a@b.com");
        assert!(sent[0].1.contains(&code));
    }

    #[actix_web::test]
    async fn immediate_reissue_hits_the_cooldown() {
        let svc = OtpService::new(RecordingNotifier::new());
        svc.generate_and_send_otp("a@b.com").await.unwrap();

        let err = svc.generate_and_send_otp("a@b.com").await.unwrap_err();
        match err {
            CustomError::CooldownActiveError(remaining) => {
                assert!(remaining > 0 && remaining <= 30);
            }
            other => panic!("expected cooldown error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn reissue_is_allowed_once_cooldown_elapses() {
        let svc = OtpService::new(RecordingNotifier::new());
        let first = svc.generate_and_send_otp("a@b.com").await.unwrap();
        backdate(&svc, "a@b.com", 31).await;

        let second = svc.generate_and_send_otp("a@b.com").await.unwrap();
        // The replacement code is the one that verifies
        if first != second {
            assert!(!svc.verify_otp("a@b.com", &first).await);
        }
        assert!(svc.verify_otp("a@b.com", &second).await);
    }

    #[actix_web::test]
    async fn verify_is_one_time_use() {
        let svc = OtpService::new(RecordingNotifier::new());
        let code = svc.generate_and_send_otp("a@b.com").await.unwrap();

        assert!(svc.verify_otp("a@b.com", &code).await);
        assert!(svc.is_email_verified("a@b.com").await);
        // Entry was consumed
        assert!(!svc.verify_otp("a@b.com", &code).await);
    }

    #[actix_web::test]
    async fn wrong_code_leaves_entry_for_retry() {
        let svc = OtpService::new(RecordingNotifier::new());
        let code = svc.generate_and_send_otp("a@b.com").await.unwrap();
        let wrong = if code == "000000" { "000001" } else { "000000" };

        assert!(!svc.verify_otp("a@b.com", wrong).await);
        assert!(svc.verify_otp("a@b.com", &code).await);
    }

    #[actix_web::test]
    async fn expired_code_is_rejected_and_pruned() {
        let svc = OtpService::new(RecordingNotifier::new());
        let code = svc.generate_and_send_otp("a@b.com").await.unwrap();
        backdate(&svc, "a@b.com", 601).await;

        assert!(!svc.verify_otp("a@b.com", &code).await);
        assert!(svc.store.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn verify_normalizes_email() {
        let svc = OtpService::new(RecordingNotifier::new());
        let code = svc.generate_and_send_otp("  A@B.com ").await.unwrap();

        assert!(svc.verify_otp("a@b.com", &code).await);
    }

    #[actix_web::test]
    async fn clear_verification_resets_the_email() {
        let svc = OtpService::new(RecordingNotifier::new());
        let code = svc.generate_and_send_otp("a@b.com").await.unwrap();
        assert!(svc.verify_otp("a@b.com", &code).await);

        svc.clear_email_verification("a@b.com").await;
        assert!(!svc.is_email_verified("a@b.com").await);
        // No stale entry pins the cooldown after clearance
        assert_eq!(svc.remaining_cooldown("a@b.com").await, 0);
        svc.generate_and_send_otp("a@b.com").await.unwrap();
    }

    #[actix_web::test]
    async fn remaining_cooldown_counts_down_to_zero() {
        let svc = OtpService::new(RecordingNotifier::new());
        assert_eq!(svc.remaining_cooldown("a@b.com").await, 0);

        svc.generate_and_send_otp("a@b.com").await.unwrap();
        let remaining = svc.remaining_cooldown("a@b.com").await;
        assert!(remaining > 0 && remaining <= 30);

        backdate(&svc, "a@b.com", 31).await;
        assert_eq!(svc.remaining_cooldown("a@b.com").await, 0);
    }

    #[actix_web::test]
    async fn delivery_failure_does_not_roll_back_issuance() {
        let svc = OtpService::new(Arc::new(FailingNotifier));
        let code = svc.generate_and_send_otp("a@b.com").await.unwrap();

        assert!(svc.verify_otp("a@b.com", &code).await);
    }

    #[actix_web::test]
    async fn empty_inputs_never_verify() {
        let svc = OtpService::new(RecordingNotifier::new());
        assert!(!svc.verify_otp("", "123456").await);
        assert!(!svc.verify_otp("a@b.com", "").await);
    }
}
