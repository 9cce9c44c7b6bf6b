//! Template instantiation and path extraction benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llmcall::services::{extract, RequestTemplate};
use llmcall::ProviderRegistry;
use serde_json::json;

fn bench_registry() -> ProviderRegistry {
    ProviderRegistry::from_json(
        r#"{
            "openai": {
                "api_url": "https://api.openai.com/v1/chat/completions",
                "request_format": {
                    "model": "model",
                    "messages": [{"role": "user", "content": "prompt"}],
                    "stream": false,
                    "temperature": 0.7,
                    "response_format": {"type": "json_object"}
                },
                "response_parsing": {
                    "content_path": ["choices", 0, "message", "content"],
                    "usage_mapping": {
                        "prompt_tokens": ["usage", "prompt_tokens"],
                        "completion_tokens": ["usage", "completion_tokens"],
                        "total_tokens": ["usage", "total_tokens"]
                    }
                }
            }
        }"#,
    )
    .unwrap()
}

fn bench_template_compile(c: &mut Criterion) {
    let format = json!({
        "model": "model",
        "messages": [{"role": "user", "content": "prompt"}],
        "stream": false,
        "temperature": 0.7,
        "response_format": {"type": "json_object"}
    });

    c.bench_function("template_compile", |b| {
        b.iter(|| RequestTemplate::compile(black_box(&format)))
    });
}

fn bench_template_instantiate(c: &mut Criterion) {
    let registry = bench_registry();
    let provider = registry.get("openai").unwrap();
    let prompt = "Summarize the following document in three bullet points.".repeat(8);

    c.bench_function("template_instantiate", |b| {
        b.iter(|| {
            provider
                .template
                .instantiate(black_box("gpt-4o"), black_box(&prompt))
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let registry = bench_registry();
    let provider = registry.get("openai").unwrap();
    let response = json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "{\"summary\": \"...\"}"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    });

    c.bench_function("extract", |b| {
        b.iter(|| extract(black_box("openai"), black_box(provider), black_box(&response)))
    });
}

criterion_group!(
    benches,
    bench_template_compile,
    bench_template_instantiate,
    bench_extract
);
criterion_main!(benches);
