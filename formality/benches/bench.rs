use criterion::{criterion_group, criterion_main, Criterion};
use formality::{Ctx, Error, GCtx, Term};

/// Boxed Church numerals, where `d{n}` applies a function `2^(n+1)` times.
fn numerals(n: usize) -> String {
    let mut src = String::from("def d0 [P : Type] [s : !{x : P} P] [S = s] |[z : P] (S (S z))\n");
    for i in 1..=n {
        let def = format!("def d{i} [P : Type] [s : !{{x : P}} P] (d{j} P (d{j} P s))\n", j = i - 1);
        src.push_str(&def);
    }
    src.push_str(&format!("(d{} Type |[x : Type] x)", n));
    src
}

fn check(src: &str) -> Result<Term, Error> {
    let (tm, gctx) = GCtx::parse(src)?;
    gctx.check()?;
    Ok(tm.infer(&Ctx::new())?)
}

fn norm(src: &str) -> Result<Term, Error> {
    Ok(Term::parse(src)?.norm(true))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let src = numerals(8);
    c.bench_function("parse", |b| b.iter(|| GCtx::parse(&src).unwrap()));
    c.bench_function("check", |b| b.iter(|| check(&src).unwrap()));
    c.bench_function("norm", |b| b.iter(|| norm(&src).unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
