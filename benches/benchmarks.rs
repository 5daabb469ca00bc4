use pokertable::cards::*;
use pokertable::dto::*;
use pokertable::gameplay::*;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_seven_cards,
        describing_a_showdown,
        shuffling_a_deck,
        playing_a_hand,
        projecting_a_document,
        restoring_a_document,
}

const SEVEN: &str = "TD 5C 7D 3C TC 6D 8H";

fn evaluating_seven_cards(c: &mut criterion::Criterion) {
    let hand = Hand::try_from(SEVEN).expect("seven cards");
    c.bench_function("evaluate a 7-card Hand", |b| {
        b.iter(|| Strength::from(hand))
    });
}

fn describing_a_showdown(c: &mut criterion::Criterion) {
    let cards = Vec::<Card>::from(Hand::try_from(SEVEN).expect("seven cards"));
    let hole = Hole::from((cards[0], cards[1]));
    c.bench_function("describe a showdown Evaluation", |b| {
        b.iter(|| Evaluation::from((hole, &cards[2..])).description())
    });
}

fn shuffling_a_deck(c: &mut criterion::Criterion) {
    use rand::SeedableRng;
    let ref mut rng = rand::rngs::SmallRng::seed_from_u64(0);
    c.bench_function("shuffle a Deck", |b| b.iter(|| Deck::shuffled(rng)));
}

fn playing_a_hand(c: &mut criterion::Criterion) {
    c.bench_function("play a 4-handed hand to the end", |b| {
        b.iter(|| settled(4))
    });
}

fn projecting_a_document(c: &mut criterion::Criterion) {
    let table = settled(6);
    c.bench_function("project and serialize a Table", |b| {
        b.iter(|| serde_json::to_string(&project(&table, &Viewer::Public)))
    });
}

fn restoring_a_document(c: &mut criterion::Criterion) {
    let json = serde_json::to_string(&project(&settled(6), &Viewer::House)).expect("serialize");
    c.bench_function("deserialize and restore a Table", |b| {
        b.iter(|| {
            let doc = serde_json::from_str::<ApiTable>(&json).expect("deserialize");
            Table::try_from(doc).expect("restore")
        })
    });
}

/// seat `n` calling stations and play one seeded hand to the end
fn settled(n: usize) -> Table {
    let options = Options::default();
    let buy_in = options.max_buy_in;
    let mut table = Table::new("0xbench", Format::Cash, options)
        .expect("options")
        .with_seed(7);
    for position in 1..=n {
        submit(&mut table, position, Action::Join(position, buy_in));
    }
    while let Some(position) = table.next_to_act() {
        let legal = table.legal(position);
        let choice = [ActionKind::Check, ActionKind::Call]
            .iter()
            .find_map(|kind| legal.iter().find(|l| l.kind == *kind))
            .or_else(|| legal.first())
            .copied()
            .expect("legal action");
        submit(&mut table, position, Action::from_parts(choice.kind, choice.min, position));
    }
    table
}

fn submit(table: &mut Table, position: usize, action: Action) {
    let address = format!("0x{:x}", position);
    let index = table.next_index();
    table
        .apply(Request::new(address, action, index))
        .expect("legal request");
}
