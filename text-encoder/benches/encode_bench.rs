use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use text_encoder::{
    Document, DocumentArray, EncodeParameters, EncoderConfig, Features, TextEncoder, TextModel,
    TraversalPaths,
};

/// Constant-output model so the benchmark measures selection and batching only
struct ConstantModel;

impl TextModel for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn dimension(&self) -> usize {
        384
    }

    fn get_embedding(&self, texts: &[&str], _use_gpu: bool) -> text_encoder::Result<Vec<Features>> {
        Ok(texts
            .iter()
            .map(|_| Features::pooled(vec![0.1; 384]))
            .collect())
    }
}

fn corpus(roots: usize, chunks: usize) -> DocumentArray {
    (0..roots)
        .map(|i| {
            (0..chunks).fold(Document::with_text(format!("root {i}")), |doc, j| {
                doc.chunk(Document::with_text(format!("chunk {i}.{j}")))
            })
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let encoder = TextEncoder::with_model(ConstantModel, EncoderConfig::default())
        .expect("valid config");
    let paths: TraversalPaths = "r,c".parse().expect("valid paths");

    let mut group = c.benchmark_group("encode");
    for batch_size in [8usize, 32, 128] {
        let params = EncodeParameters::new()
            .with_batch_size(batch_size)
            .with_traversal_paths(paths.clone());
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &params,
            |b, params| {
                b.iter_batched(
                    || corpus(200, 4),
                    |mut docs| {
                        encoder.encode(&mut docs, params).expect("encode");
                        black_box(docs)
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
