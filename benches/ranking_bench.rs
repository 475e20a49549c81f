use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hostpulse::report::{self, View};
use hostpulse::system::fake::FakeProbe;
use hostpulse::system::network::{NetworkCounters, RateTracker};
use hostpulse::system::process::{ProcessInfo, top_by_cpu};
use hostpulse::system::{Sampler, SamplerOptions};
use std::hint::black_box;

fn make_processes(n: usize) -> Vec<ProcessInfo> {
    (0..n)
        .map(|i| ProcessInfo {
            pid: i as u32 + 1,
            name: format!("proc_{i}"),
            kernel_time_ms: (i % 37) as u64 * 10,
            user_time_ms: (i % 101) as u64 * 25,
            uptime_ms: 60_000 + (i % 13) as u64 * 1_000,
            resident_bytes: ((n - i) as u64 + 1) * 4096,
            virtual_bytes: ((n - i) as u64 + 1) * 65_536,
        })
        .collect()
}

fn bench_top_by_cpu(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_by_cpu_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let processes = make_processes(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &processes,
            |b, processes| {
                b.iter(|| {
                    let ranked = top_by_cpu(black_box(processes), black_box(10));
                    black_box(ranked);
                })
            },
        );
    }

    group.finish();
}

fn bench_rate_tick(c: &mut Criterion) {
    c.bench_function("rate_tracker_tick", |b| {
        let mut tracker = RateTracker::new();
        let mut counters = NetworkCounters::default();
        b.iter(|| {
            counters.sent_bytes += 1500;
            counters.received_bytes += 9000;
            counters.sent_packets += 1;
            counters.received_packets += 6;
            tracker.tick(black_box(counters));
            black_box(tracker.sample());
        })
    });
}

fn bench_top_view_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_view_render_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let mut probe = FakeProbe::new();
        probe.processes = make_processes(size);
        let sampler = Sampler::new(probe, SamplerOptions::default());
        let handle = sampler.handle();

        group.bench_with_input(BenchmarkId::from_parameter(size), &handle, |b, handle| {
            b.iter(|| {
                let output = report::render(View::Top, black_box(handle), 20)
                    .expect("bench render failed");
                black_box(output);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_top_by_cpu, bench_rate_tick, bench_top_view_render);
criterion_main!(benches);
