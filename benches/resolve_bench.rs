//! Shai 编解码器选择性能基准测试.
//!
//! 覆盖大目录下的候选分组与完整选择路径.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shai::codec::{CandidateSet, CodecDescriptor, CodecRegistry, ExclusionList, GenericCodec};
use shai::core::CodecRole;

const MEDIA_TYPES: [&str; 6] = [
    "video/avc",
    "video/hevc",
    "video/x-vnd.on2.vp9",
    "audio/mp4a-latm",
    "audio/opus",
    "audio/flac",
];

/// 生成约 N 个编解码器的模拟设备目录, 每四个中有一个为 Exynos 实现
fn make_catalog(n: usize) -> Vec<CodecDescriptor> {
    (0..n)
        .map(|i| {
            let vendor = if i % 4 == 0 { "Exynos" } else { "google" };
            let media_type = MEDIA_TYPES[i % MEDIA_TYPES.len()];
            let role = if i % 2 == 0 {
                CodecRole::Decoder
            } else {
                CodecRole::Encoder
            };
            CodecDescriptor::new(format!("OMX.{vendor}.codec{i}"), role, [media_type])
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let codecs = make_catalog(512);
    let exclusions = ExclusionList::builtin();
    c.bench_function("partition_512_avc_decoder", |b| {
        b.iter(|| {
            let set = CandidateSet::partition(
                black_box(codecs.clone()),
                "video/avc",
                CodecRole::Decoder,
                &exclusions,
            );
            black_box(set.first_allowed().is_some())
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut registry = CodecRegistry::new();
    for desc in make_catalog(512) {
        registry.register(desc, GenericCodec::create);
    }
    let resolver = shai::default_resolver(registry);
    c.bench_function("resolve_512_hevc_encoder", |b| {
        b.iter(|| {
            let _ = black_box(resolver.resolve_encoder(black_box("video/hevc")));
        });
    });
}

criterion_group!(benches, bench_partition, bench_resolve);
criterion_main!(benches);
