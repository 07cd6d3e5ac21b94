use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prereq_engine::character::{AttributeKind, Character, Skill, Spell};
use prereq_engine::criteria::{IntegerCriteria, StringCriteria};
use prereq_engine::prereq::{
    AttributePrereq, PrereqList, PrereqTree, Request, SkillPrereq, SpellPrereq,
};

fn sample_character(seed: i32) -> Character {
    let mut character = Character::new(format!("Bench {}", seed))
        .with_tech_level("3")
        .with_attribute(AttributeKind::St, 10 + seed % 5);
    for i in 0..40 {
        character = character.with_skill(Skill::new(format!("Skill {}", i), 10 + (i + seed) % 6));
    }
    for i in 0..20 {
        character = character.with_spell(Spell::new(format!("Spell {}", i), format!("College {}", i % 7), 1));
    }
    character
}

fn sample_tree() -> PrereqTree {
    let mut tree = PrereqTree::new(true);
    let root = tree.root();
    for group in 0..4 {
        let any = tree.push(root, PrereqList::new(false).into()).unwrap();
        for i in 0..5 {
            let name = format!("Skill {}", group * 5 + i);
            tree.push(
                any,
                SkillPrereq::named(StringCriteria::is(name))
                    .with_level(IntegerCriteria::at_least(13))
                    .into(),
            )
            .unwrap();
        }
    }
    tree.push(
        root,
        AttributePrereq::new(AttributeKind::St, IntegerCriteria::at_least(12)).into(),
    )
    .unwrap();
    tree.push(root, SpellPrereq::college_count(IntegerCriteria::at_least(5)).into())
        .unwrap();
    tree
}

fn bench_single(c: &mut Criterion) {
    let character = sample_character(1);
    let tree = sample_tree();

    c.bench_function("evaluate_silent", |b| {
        b.iter(|| tree.satisfied(black_box(&Request::new(&character))))
    });
    c.bench_function("evaluate_explained", |b| {
        b.iter(|| tree.satisfied(black_box(&Request::new(&character).explained("- "))))
    });
}

fn bench_batch(c: &mut Criterion) {
    let characters: Vec<Character> = (0..1000).map(sample_character).collect();
    let tree = sample_tree();

    c.bench_function("evaluate_batch_1000", |b| {
        b.iter(|| tree.evaluate_batch(black_box(&characters), Some("- ")))
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
