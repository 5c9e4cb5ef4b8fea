//! Benchmarks for talkpack parsing and processing operations.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- header`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use talkpack::config::{ParserConfig, PreprocessConfig};
use talkpack::core::{
    Preprocessor, WindowSpec, filter_by_period, filter_by_sender, mask_pii, serialize,
};
use talkpack::parser::{detect_format, parse_str};
use talkpack::parsers::{CsvParser, HeaderParser, InlineParser, InlineStyle};

// =============================================================================
// Test Data Generators
// =============================================================================

const MESSAGES_PER_DAY: usize = 50;

fn sender(i: usize) -> &'static str {
    if i % 2 == 0 { "민지" } else { "지훈" }
}

/// (month, day, hour, minute) for the i-th message, wrapping within 2025.
fn stamp(i: usize) -> (usize, usize, usize, usize) {
    let day_index = i / MESSAGES_PER_DAY;
    let month = day_index / 28 % 12 + 1;
    let day = day_index % 28 + 1;
    (month, day, i % 24, i % 60)
}

fn meridiem(hour: usize) -> (&'static str, usize) {
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    (if hour < 12 { "오전" } else { "오후" }, display)
}

fn generate_header_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + count / MESSAGES_PER_DAY + 1);
    for i in 0..count {
        let (month, day, hour, minute) = stamp(i);
        if i % MESSAGES_PER_DAY == 0 {
            lines.push(format!("--------------- 2025년 {month}월 {day}일 월요일 ---------------"));
        }
        let (ampm, h) = meridiem(hour);
        lines.push(format!("[{}] [{ampm} {h}:{minute:02}] Message number {i}", sender(i)));
        if i % 10 == 0 {
            lines.push("second line of the message".to_string());
        }
    }
    lines.join("\n")
}

fn generate_long_date_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let (month, day, hour, minute) = stamp(i);
        let (ampm, h) = meridiem(hour);
        lines.push(format!(
            "2025년 {month}월 {day}일 {ampm} {h}:{minute:02}, {} : Message number {i}",
            sender(i)
        ));
    }
    lines.join("\n")
}

fn generate_dot_date_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let (month, day, hour, minute) = stamp(i);
        let (ampm, h) = meridiem(hour);
        lines.push(format!(
            "2025. {month}. {day}. {ampm} {h}:{minute:02}, {} : Message number {i}",
            sender(i)
        ));
    }
    lines.join("\n")
}

fn generate_csv(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + 1);
    lines.push("Date,User,Message".to_string());
    for i in 0..count {
        let (month, day, hour, minute) = stamp(i);
        lines.push(format!(
            "2025-{month:02}-{day:02} {hour:02}:{minute:02}:00,\"{}\",\"Message number {i}, with comma\"",
            sender(i)
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Detection Benchmarks
// =============================================================================

fn bench_detect_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_format");
    let config = ParserConfig::default();

    for (name, text) in [
        ("csv", generate_csv(100)),
        ("header", generate_header_txt(100)),
        ("dot_date", generate_dot_date_txt(100)),
        ("long_date", generate_long_date_txt(100)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| black_box(detect_format(black_box(text), &config)));
        });
    }
    group.finish();
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_header_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_parsing");
    let parser = HeaderParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let text = generate_header_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parser.parse_str(black_box(text))));
        });
    }
    group.finish();
}

fn bench_inline_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline_parsing");
    let long = InlineParser::new(InlineStyle::LongDate);
    let dot = InlineParser::new(InlineStyle::DotDate);

    for size in [1_000_usize, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        let text = generate_long_date_txt(size);
        group.bench_with_input(BenchmarkId::new("long_date", size), &text, |b, text| {
            b.iter(|| black_box(long.parse_str(black_box(text))));
        });

        let text = generate_dot_date_txt(size);
        group.bench_with_input(BenchmarkId::new("dot_date", size), &text, |b, text| {
            b.iter(|| black_box(dot.parse_str(black_box(text))));
        });
    }
    group.finish();
}

fn bench_csv_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_parsing");
    let parser = CsvParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let text = generate_csv(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parser.parse_str(black_box(text))));
        });
    }
    group.finish();
}

// =============================================================================
// Processing Benchmarks
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let store = parse_str(&generate_header_txt(10_000), &ParserConfig::default()).store;

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("recent_days", |b| {
        let spec = WindowSpec::recent_days(14);
        b.iter(|| black_box(filter_by_period(black_box(&store), &spec)));
    });
    group.bench_function("sender", |b| {
        b.iter(|| black_box(filter_by_sender(black_box(&store), "민지")));
    });
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [1_000_usize, 10_000] {
        let store = HeaderParser::new().parse_str(&generate_header_txt(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(serialize(black_box(store))));
        });
    }
    group.finish();
}

fn bench_mask_pii(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_pii");

    for (name, text) in [
        ("plain", "오늘 점심 뭐 먹지? 학교 앞에서 12시에 보자"),
        ("phone", "내 번호 010-1234-5678 로 연락 줘"),
        ("mixed", "메일 minji@example.com 주소 서울 강남구 테헤란로 123 https://example.com"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(mask_pii(black_box(text))));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let preprocessor = Preprocessor::with_config(PreprocessConfig::new().with_max_chars(50_000));
    let window = WindowSpec::recent_days(14);

    for size in [1_000_usize, 10_000, 50_000] {
        let text = generate_header_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                // Full pipeline: detect -> tokenize -> window -> probe -> serialize -> truncate
                let result = preprocessor.preprocess(black_box(text), Some("민지"), Some(&window));
                black_box(result)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_detect_format,
    bench_header_parsing,
    bench_inline_parsing,
    bench_csv_parsing,
    bench_filters,
    bench_serialize,
    bench_mask_pii,
    bench_full_pipeline,
);

criterion_main!(benches);
