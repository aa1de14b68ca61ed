use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, RefundRequest, RefundStatus};

use super::{BookingStore, RefundStore};

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StoreUnavailable {
        message: "store lock poisoned".to_string(),
    }
}

/// A thread-safe in-memory booking store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingStore {
    bookings: Arc<RwLock<HashMap<String, Booking>>>,
}

impl InMemoryBookingStore {
    /// Creates a new, empty in-memory booking store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a booking.
    pub fn put(&self, booking: Booking) -> EngineResult<()> {
        let mut bookings = self.bookings.write().map_err(poisoned)?;
        bookings.insert(booking.id.clone(), booking);
        Ok(())
    }
}

impl BookingStore for InMemoryBookingStore {
    fn get_booking(&self, booking_id: &str) -> EngineResult<Option<Booking>> {
        let bookings = self.bookings.read().map_err(poisoned)?;
        Ok(bookings.get(booking_id).cloned())
    }
}

/// A thread-safe in-memory refund store.
///
/// The write lock is held across each check and its write, which makes
/// [`RefundStore::insert_unless_active`] and
/// [`RefundStore::compare_and_swap`] atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRefundStore {
    refunds: Arc<RwLock<HashMap<Uuid, RefundRequest>>>,
}

impl InMemoryRefundStore {
    /// Creates a new, empty in-memory refund store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefundStore for InMemoryRefundStore {
    fn insert_unless_active(&self, request: RefundRequest) -> EngineResult<()> {
        let mut refunds = self.refunds.write().map_err(poisoned)?;
        if refunds.contains_key(&request.id) {
            return Err(EngineError::StoreUnavailable {
                message: format!("refund {} already exists", request.id),
            });
        }

        if let Some(active) = refunds
            .values()
            .find(|r| r.booking_id == request.booking_id && r.status != RefundStatus::Rejected)
        {
            return Err(EngineError::DuplicateRefund {
                booking_id: request.booking_id,
                existing: active.id,
            });
        }

        refunds.insert(request.id, request);
        Ok(())
    }

    fn get(&self, id: Uuid) -> EngineResult<Option<RefundRequest>> {
        let refunds = self.refunds.read().map_err(poisoned)?;
        Ok(refunds.get(&id).cloned())
    }

    fn compare_and_swap(&self, expected_version: u64, request: RefundRequest) -> EngineResult<()> {
        let mut refunds = self.refunds.write().map_err(poisoned)?;
        let stored = refunds
            .get_mut(&request.id)
            .ok_or(EngineError::RefundNotFound { id: request.id })?;

        if stored.version != expected_version {
            return Err(EngineError::ConcurrentModification {
                id: request.id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        *stored = request;
        Ok(())
    }

    fn find_by_booking(&self, booking_id: &str) -> EngineResult<Vec<RefundRequest>> {
        let refunds = self.refunds.read().map_err(poisoned)?;
        let mut found: Vec<RefundRequest> = refunds
            .values()
            .filter(|r| r.booking_id == booking_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.request_date);
        Ok(found)
    }

    fn list(&self, status: Option<RefundStatus>) -> EngineResult<Vec<RefundRequest>> {
        let refunds = self.refunds.read().map_err(poisoned)?;
        let mut found: Vec<RefundRequest> = refunds
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.request_date.cmp(&b.request_date).then(a.id.cmp(&b.id)));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn create_request(booking_id: &str, day: u32) -> RefundRequest {
        RefundRequest {
            id: Uuid::new_v4(),
            booking_id: booking_id.to_string(),
            policy_id: "standard".to_string(),
            request_date: Utc.with_ymd_and_hms(2026, 2, day, 12, 0, 0).unwrap(),
            original_amount: Decimal::from(100),
            penalty_percentage: Decimal::from(10),
            penalty_amount: Decimal::from(10),
            refund_amount: Decimal::from(90),
            status: RefundStatus::PendingExpertReview,
            expert_reviewer_name: None,
            expert_review_date: None,
            financial_reviewer_name: None,
            financial_review_date: None,
            payment_processor_name: None,
            payment_date: None,
            rejecter_name: None,
            rejection_date: None,
            rejection_reason: None,
            version: 0,
        }
    }

    #[test]
    fn test_refund_store_insert_and_get() {
        let store = InMemoryRefundStore::new();
        let request = create_request("bk_001", 1);

        store.insert_unless_active(request.clone()).unwrap();
        assert_eq!(store.get(request.id).unwrap(), Some(request));
    }

    #[test]
    fn test_refund_store_rejects_duplicate_insert() {
        let store = InMemoryRefundStore::new();
        let request = create_request("bk_001", 1);

        store.insert_unless_active(request.clone()).unwrap();
        assert!(store.insert_unless_active(request).is_err());
    }

    #[test]
    fn test_insert_rejects_second_active_refund_for_booking() {
        let store = InMemoryRefundStore::new();
        let first = create_request("bk_001", 1);
        store.insert_unless_active(first.clone()).unwrap();

        match store.insert_unless_active(create_request("bk_001", 2)) {
            Err(EngineError::DuplicateRefund {
                booking_id,
                existing,
            }) => {
                assert_eq!(booking_id, "bk_001");
                assert_eq!(existing, first.id);
            }
            other => panic!("Expected DuplicateRefund, got {:?}", other),
        }
        assert_eq!(store.find_by_booking("bk_001").unwrap().len(), 1);
    }

    #[test]
    fn test_insert_allows_new_refund_after_rejection() {
        let store = InMemoryRefundStore::new();
        let mut rejected = create_request("bk_001", 1);
        rejected.status = RefundStatus::Rejected;
        store.insert_unless_active(rejected).unwrap();

        store.insert_unless_active(create_request("bk_001", 2)).unwrap();
        assert_eq!(store.find_by_booking("bk_001").unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_inserts_leave_one_active_refund() {
        const THREADS: usize = 8;

        for _ in 0..50 {
            let store = InMemoryRefundStore::new();
            let barrier = Arc::new(std::sync::Barrier::new(THREADS));

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = store.clone();
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        store.insert_unless_active(create_request("bk_001", 1)).is_ok()
                    })
                })
                .collect();

            let inserted = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count();
            assert_eq!(inserted, 1);
            assert_eq!(store.find_by_booking("bk_001").unwrap().len(), 1);
        }
    }

    #[test]
    fn test_compare_and_swap_succeeds_on_matching_version() {
        let store = InMemoryRefundStore::new();
        let request = create_request("bk_001", 1);
        store.insert_unless_active(request.clone()).unwrap();

        let mut updated = request.clone();
        updated.status = RefundStatus::PendingFinancialReview;
        updated.version = 1;
        store.compare_and_swap(0, updated.clone()).unwrap();

        assert_eq!(store.get(request.id).unwrap(), Some(updated));
    }

    #[test]
    fn test_compare_and_swap_fails_on_stale_version() {
        let store = InMemoryRefundStore::new();
        let request = create_request("bk_001", 1);
        store.insert_unless_active(request.clone()).unwrap();

        let mut first = request.clone();
        first.version = 1;
        store.compare_and_swap(0, first).unwrap();

        let mut second = request.clone();
        second.version = 1;
        match store.compare_and_swap(0, second) {
            Err(EngineError::ConcurrentModification {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected ConcurrentModification, got {:?}", other),
        }
    }

    #[test]
    fn test_compare_and_swap_unknown_id() {
        let store = InMemoryRefundStore::new();
        assert!(matches!(
            store.compare_and_swap(0, create_request("bk_001", 1)),
            Err(EngineError::RefundNotFound { .. })
        ));
    }

    #[test]
    fn test_list_filters_and_orders_by_date() {
        let store = InMemoryRefundStore::new();
        let later = create_request("bk_002", 5);
        let earlier = create_request("bk_001", 2);
        let mut rejected = create_request("bk_003", 3);
        rejected.status = RefundStatus::Rejected;

        store.insert_unless_active(later.clone()).unwrap();
        store.insert_unless_active(earlier.clone()).unwrap();
        store.insert_unless_active(rejected.clone()).unwrap();

        let all: Vec<Uuid> = store.list(None).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(all, vec![earlier.id, rejected.id, later.id]);

        let pending = store.list(Some(RefundStatus::PendingExpertReview)).unwrap();
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_find_by_booking() {
        let store = InMemoryRefundStore::new();
        store.insert_unless_active(create_request("bk_001", 1)).unwrap();
        store.insert_unless_active(create_request("bk_002", 1)).unwrap();

        assert_eq!(store.find_by_booking("bk_001").unwrap().len(), 1);
        assert!(store.find_by_booking("bk_999").unwrap().is_empty());
    }

    #[test]
    fn test_booking_store_put_and_get() {
        let store = InMemoryBookingStore::new();
        assert_eq!(store.get_booking("bk_001").unwrap(), None);

        let booking = Booking {
            id: "bk_001".to_string(),
            amount: Decimal::from(100),
            currency: "IRR".to_string(),
            departure_time: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
            source: crate::models::BookingSource::Direct {
                pnr: "ABC123".to_string(),
            },
        };
        store.put(booking.clone()).unwrap();
        assert_eq!(store.get_booking("bk_001").unwrap(), Some(booking));
    }
}
