//! Benchmark tests for kino-abr estimation
//!
//! Run with: cargo bench -p kino-abr

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kino_abr::{
    average_bitrate, bitrates_using_future_info, bitrates_using_past_info, Direction, Format,
    HistoryEntry, SegmentDescriptor,
};

// ============================================================================
// Helpers
// ============================================================================

const SEGMENT_US: u64 = 4_000_000;
const MAX_WINDOW_US: i64 = 30_000_000;

fn create_test_segments(count: u64, bitrate: u64) -> Vec<SegmentDescriptor> {
    (0..count)
        .map(|i| {
            let length = bitrate / 2 + (i % 7) * 1_000;
            SegmentDescriptor::new(i * SEGMENT_US, (i + 1) * SEGMENT_US, Some(length)).unwrap()
        })
        .collect()
}

fn create_test_ladder() -> Vec<Format> {
    [400_000, 800_000, 1_400_000, 2_800_000, 5_000_000, 8_000_000]
        .into_iter()
        .map(Format::with_bitrate)
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("average_bitrate");

    for count in [1u64, 8, 64, 512] {
        let segments = create_test_segments(count, 2_800_000);
        group.bench_with_input(BenchmarkId::new("forward", count), &segments, |b, s| {
            b.iter(|| average_bitrate(black_box(s), MAX_WINDOW_US, Direction::Forward))
        });
        group.bench_with_input(BenchmarkId::new("backward", count), &segments, |b, s| {
            b.iter(|| average_bitrate(black_box(s), MAX_WINDOW_US, Direction::Backward))
        });
    }

    group.finish();
}

fn bench_future_info(c: &mut Criterion) {
    let formats = create_test_ladder();
    // Every other track lacks lookahead and falls back to a neighbour
    let sequences: Vec<Vec<SegmentDescriptor>> = formats
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if i % 2 == 0 {
                create_test_segments(10, f.nominal_bitrate().unwrap_or(0))
            } else {
                Vec::new()
            }
        })
        .collect();

    c.bench_function("future_info_ladder", |b| {
        b.iter(|| bitrates_using_future_info(black_box(&sequences), &formats, MAX_WINDOW_US))
    });
}

fn bench_past_info(c: &mut Criterion) {
    let formats = create_test_ladder();
    let history: Vec<HistoryEntry> = (0..120u64)
        .map(|i| {
            let format = &formats[(i / 20) as usize % formats.len()];
            HistoryEntry::new(
                format.clone(),
                i * SEGMENT_US,
                (i + 1) * SEGMENT_US,
                Some(format.nominal_bitrate().unwrap_or(0) / 2),
            )
            .unwrap()
        })
        .collect();

    c.bench_function("past_info_ladder", |b| {
        b.iter(|| bitrates_using_past_info(black_box(&history), &formats, MAX_WINDOW_US))
    });
}

criterion_group!(benches, bench_average, bench_future_info, bench_past_info);
criterion_main!(benches);
