use criterion::{criterion_group, criterion_main, Criterion};
use engine::tokenizer::tokenize;
use engine::{ArticleStore, NewArticle, SortOrder};

const WORDS: &[&str] = &[
    "rust", "guide", "async", "index", "search", "memory", "parser", "thread", "socket", "macro",
];

fn corpus_store(count: usize) -> ArticleStore {
    let mut store = ArticleStore::new();
    for i in 0..count {
        let title = format!("{} {} notes", WORDS[i % WORDS.len()], WORDS[(i / 3) % WORDS.len()]);
        let body = format!(
            "Observations on {} and {} with a detour through {}",
            WORDS[(i + 1) % WORDS.len()],
            WORDS[(i + 5) % WORDS.len()],
            WORDS[(i + 7) % WORDS.len()],
        );
        store
            .create(NewArticle {
                id: None,
                title,
                body,
                tags: vec![WORDS[(i + 2) % WORDS.len()].to_string()],
            })
            .unwrap();
    }
    store
}

fn bench_tokenize(c: &mut Criterion) {
    let text = "Observations on rust and async with a detour through macro expansion, \
                repeated over and over until the tokenizer has something to chew on"
        .repeat(16);
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let store = corpus_store(1_000);
    c.bench_function("search_1k_relevance", |b| {
        b.iter(|| store.search("rust search notes", SortOrder::Relevance))
    });
    c.bench_function("search_1k_date", |b| {
        b.iter(|| store.search("rust search notes", SortOrder::Date))
    });
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
