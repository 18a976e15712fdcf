use std::hint::black_box;

use br_translate::rules::RuleList;
use criterion::{Criterion, criterion_group, criterion_main};

const ALPHABET_RULES: &str = "\
# lettres a-j, puis k-t (+3), puis u-z
1 a 1
2 b 12
3 c 14
4 d 145
5 e 15
6 f 124
7 g 1245
8 h 125
9 i 24
10 j 245
11 k 13
12 l 123
13 m 134
14 n 1345
15 o 135
16 p 1234
17 q 12345
18 r 1235
19 s 234
20 t 2345
21 u 136
22 v 1236
23 w 2456
24 x 1346
25 y 13456
26 z 1356
";

fn sample_text() -> String {
    let line = "the quick brown fox jumps over the lazy dog";
    vec![line; 200].join("\n")
}

fn bench_translate(c: &mut Criterion) {
    let rules = RuleList::from_text(ALPHABET_RULES).unwrap_or_default();
    let forward = rules.to_forward_table();
    let back = rules.to_back_table();
    let text = sample_text();
    let page = forward.translate_text(&text).unwrap_or_default();

    c.bench_function("forward_translate_text_200_lines", |b| {
        b.iter(|| forward.translate_text(black_box(&text)));
    });

    c.bench_function("back_translate_text_200_lines", |b| {
        b.iter(|| back.translate_text(black_box(&page)));
    });

    c.bench_function("compile_rule_list", |b| {
        b.iter(|| RuleList::from_text(black_box(ALPHABET_RULES)).map(|r| r.to_forward_table()));
    });
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
