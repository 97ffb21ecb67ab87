use chrono::{Duration as ChronoDuration, Utc};
use identigen_macros::test_traced;
use identigen_provider::{
    from_constant, from_timestamp, hash, partitioned, significant_bits, Precision,
    SystemClock, TimestampSource, ValueProvider, ValueProviderFor,
};
use std::{
    sync::Arc,
    thread,
    time::{Duration, SystemTime},
};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[test_traced]
fn test_bits() {
    for (value, bits) in [(0, 0), (1, 1), (2, 2), (4, 3), (64, 7)] {
        assert_eq!(significant_bits(value), bits);
    }
}

#[test_traced]
fn test_constant_ignores_inputs() {
    let provider = from_constant(42);
    assert_eq!(provider.significant_bits(), 6);
    assert_eq!(provider.value(&SystemTime::now(), &7u8), 42);
    assert_eq!(provider.value(&Utc::now(), "anything"), 42);
    assert_eq!(provider.value(&Utc::now().naive_local(), &(1, 2)), 42);
}

#[test_traced]
fn test_partitioned_matches_hash() {
    let provider = partitioned(11).unwrap();
    assert_eq!(provider.significant_bits(), significant_bits(10));
    assert_eq!(provider.significant_bits(), 4);
    let now = Utc::now();
    for key in 0u64..1_000 {
        let value = provider.value(&now, &key);
        assert_eq!(value, hash(&key) % 11);
        assert!(value < 1 << provider.significant_bits());
    }
    for key in ["alpha", "beta", "gamma"] {
        assert_eq!(provider.value(&now, key), hash(key) % 11);
    }
}

#[test_traced]
fn test_partitions_stable_across_builds() {
    let now = SystemTime::now();
    let eleven = partitioned(11).unwrap();
    assert_eq!(eleven.value(&now, &13u64), 0);
    assert_eq!(eleven.value(&now, &42u64), 4);
    let sixty_four = partitioned(64).unwrap();
    assert_eq!(sixty_four.value(&now, &42u64), 58);
    assert_eq!(sixty_four.value(&now, "tenant"), 22);
}

#[test_traced]
fn test_hours_since_start_of_day() {
    let epoch = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let provider = from_timestamp(epoch, DAY, Precision::Millis).unwrap();
    assert_eq!(provider.significant_bits(), 27);

    let later = epoch + ChronoDuration::hours(3);
    assert_eq!(provider.value(&later, &0u32), 10_800_000);
    let system: SystemTime = later.into();
    assert_eq!(provider.value(&system, &0u32), 10_800_000);
}

#[test_traced]
fn test_naive_clock() {
    let epoch = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap();
    let provider = from_timestamp(epoch, DAY, Precision::Seconds).unwrap();
    assert_eq!(provider.significant_bits(), significant_bits(86_399));
    let later = epoch + ChronoDuration::minutes(61);
    assert_eq!(provider.value(&later, "key"), 3_660);
}

#[test_traced]
fn test_values_fit_bits() {
    let epoch = SystemTime::now();
    let provider = from_timestamp(epoch, Duration::from_millis(1_000), Precision::Micros).unwrap();
    let bits = provider.significant_bits();
    for offset in [0u64, 1, 999_999, 1_000_000, 123_456_789] {
        let ts = epoch + Duration::from_nanos(offset * 7);
        assert!(provider.value(&ts, &()) < 1 << bits);
        let ts = epoch - Duration::from_nanos(offset * 7);
        assert!(provider.value(&ts, &()) < 1 << bits);
    }
}

#[test_traced]
fn test_sourced_timestamps() {
    let provider = from_timestamp(SystemClock.now(), DAY, Precision::Millis).unwrap();
    let fixed = || SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    let first = provider.value(&fixed.now(), &1u64);
    assert_eq!(first, provider.value(&fixed.now(), &1u64));
    assert!(provider.value(&SystemClock.now(), &1u64) < 1 << provider.significant_bits());
}

#[test_traced]
fn test_shared_across_threads() {
    let provider = Arc::new(partitioned(64).unwrap());
    let expected: Vec<u64> = (0u64..256).map(|key| hash(&key) % 64).collect();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let provider = Arc::clone(&provider);
            thread::spawn(move || {
                let now = SystemTime::now();
                (0u64..256)
                    .map(|key| provider.value(&now, &key))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
