use hostpulse::report::{self, View};
use hostpulse::system::fake::FakeProbe;
use hostpulse::system::network::NetworkCounters;
use hostpulse::system::{Category, Sampler, SamplerOptions};
use insta::assert_snapshot;

fn sampler_with(probe: FakeProbe) -> Sampler<FakeProbe> {
    Sampler::new(probe, SamplerOptions::default())
}

#[test]
fn top_view_from_scripted_processes() {
    let sampler = sampler_with(FakeProbe::new());
    let output = report::render(View::Top, &sampler.handle(), 8).expect("top view renders");

    assert_snapshot!("top_view", output);
}

#[test]
fn summary_view_from_scripted_host() {
    let sampler = sampler_with(FakeProbe::new());
    let output = report::render(View::Summary, &sampler.handle(), 8).expect("summary renders");

    assert_snapshot!("summary_view", output);
}

#[test]
fn network_view_after_two_ticks() {
    let mut probe = FakeProbe::new();
    probe.push_counters(NetworkCounters {
        sent_bytes: 1_000,
        received_bytes: 5_000,
        sent_packets: 10,
        received_packets: 50,
    });
    probe.push_counters(NetworkCounters {
        sent_bytes: 2_500,
        received_bytes: 9_000,
        sent_packets: 25,
        received_packets: 80,
    });

    let mut sampler = sampler_with(probe);
    sampler.on_tick();
    let output = report::render(View::Network, &sampler.handle(), 8).expect("network renders");

    assert_snapshot!("network_view", output);
}

#[test]
fn failed_category_keeps_report_shape() {
    let mut sampler = sampler_with(FakeProbe::new());
    let before = report::render(View::Summary, &sampler.handle(), 8).expect("summary renders");

    sampler.probe_mut().fail(Category::Gpu);
    sampler.probe_mut().gpu.name = "changed while failing".to_string();
    sampler.on_tick();

    let after = report::render(View::Summary, &sampler.handle(), 8).expect("summary renders");
    assert_eq!(before, after);
    assert_eq!(sampler.failing_categories(), vec![Category::Gpu]);
}
