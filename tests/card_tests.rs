//! Card catalog, pattern orientation and card text/serde forms.

use temple_cards::board::Board;
use temple_cards::cards::{Card, CardCatalog, Pattern};
use temple_cards::core::{Coord, EngineError, Player, BOARD_SIZE};

fn card<'a>(catalog: &'a CardCatalog, name: &str) -> &'a Card {
    catalog.get(catalog.by_name(name).unwrap()).unwrap()
}

#[test]
fn test_standard_catalog_contents() {
    let catalog = CardCatalog::standard();
    let names: Vec<&str> = catalog.iter().map(|(_, card)| card.name()).collect();
    assert_eq!(
        names,
        vec![
            "Boar", "Cobra", "Crab", "Crane", "Dragon", "Eel", "Elephant", "Frog", "Goose", "Horse", "Mantis",
            "Monkey", "Ox", "Rabbit", "Rooster", "Tiger"
        ]
    );
    for (_, card) in catalog.iter() {
        assert!(!card.pattern().is_empty(), "{} has no moves", card.name());
    }
    let stamps_one = catalog.iter().filter(|(_, c)| c.stamp() == Player::One).count();
    assert_eq!(stamps_one, 8);
}

#[test]
fn test_tiger_from_both_seats() {
    let catalog = CardCatalog::standard();
    let tiger = card(&catalog, "Tiger");

    let one = tiger.valid_moves(Coord::new(2, 2), Player::One, BOARD_SIZE);
    assert!(one.contains(&Coord::new(0, 2)));
    assert!(one.contains(&Coord::new(3, 2)));

    let two = tiger.valid_moves(Coord::new(2, 2), Player::Two, BOARD_SIZE);
    assert!(two.contains(&Coord::new(4, 2)));
    assert!(two.contains(&Coord::new(1, 2)));
}

#[test]
fn test_off_board_moves_dropped() {
    let catalog = CardCatalog::standard();
    for (_, card) in catalog.iter() {
        for player in Player::ALL {
            for from in Coord::all() {
                assert!(card
                    .valid_moves(from, player, BOARD_SIZE)
                    .iter()
                    .all(|to| to.is_on_board()));
            }
        }
    }
}

#[test]
fn test_extreme_coordinates_never_overflow() {
    let catalog = CardCatalog::standard();
    let tiger = card(&catalog, "Tiger");

    assert!(!tiger.is_valid_move(Coord::new(-100, 0), Coord::new(100, 0), Player::One));
    assert!(!tiger.is_valid_move(Coord::new(127, 127), Coord::new(-128, -128), Player::Two));
    assert!(tiger.valid_moves(Coord::new(-128, -128), Player::Two, BOARD_SIZE).is_empty());

    // Steps past the i8 range are dropped; the others are still found.
    let moves = tiger.valid_moves(Coord::new(127, 0), Player::One, 127);
    assert_eq!(moves.to_vec(), vec![Coord::new(125, 0)]);
    let moves = tiger.valid_moves(Coord::new(126, 0), Player::Two, 127);
    assert_eq!(moves.to_vec(), vec![Coord::new(125, 0)]);
}

#[test]
fn test_orientation_point_reflection() {
    let catalog = CardCatalog::standard();
    for (_, card) in catalog.iter() {
        for from in Coord::all() {
            let mut one: Vec<Coord> = card.valid_moves(from, Player::One, BOARD_SIZE).to_vec();
            let mut two: Vec<Coord> = card
                .valid_moves(from.rotated(), Player::Two, BOARD_SIZE)
                .iter()
                .map(|to| to.rotated())
                .collect();
            one.sort();
            two.sort();
            assert_eq!(one, two, "{} from {from}", card.name());
        }
    }
}

#[test]
fn test_is_valid_move_agrees_with_valid_moves() {
    let catalog = CardCatalog::standard();
    let crab = card(&catalog, "Crab");
    let from = Coord::new(2, 2);
    for player in Player::ALL {
        let moves = crab.valid_moves(from, player, BOARD_SIZE);
        for to in Coord::all() {
            assert_eq!(crab.is_valid_move(from, to, player), moves.contains(&to));
        }
    }
}

#[test]
fn test_text_form() {
    let catalog = CardCatalog::standard();
    for (_, card) in catalog.iter() {
        let parsed: Card = card.encode().parse().unwrap();
        assert_eq!(&parsed, card);
    }

    assert_eq!(card(&catalog, "Ox").encode(), "Ox|1|00000/00100/00010/00100/00000");

    for bad in [
        "",
        "Ox|1",
        "Ox|3|00000/00100/00010/00100/00000",
        "Ox|1|00000/00100/00110/00100/00000",
        "Ox|1|00000/00100/00010/00100",
        "Ox|1|00000/00100/00010/00100/0000x",
        "|1|00000/00100/00010/00100/00000",
        "Ox |1|00000/00100/00010/00100/00000",
        "Ox|1| 00000/00100/00010/00100/00000",
    ] {
        assert!(bad.parse::<Card>().is_err(), "{bad:?} parsed");
    }
}

#[test]
fn test_padded_names_rejected() {
    let pattern = *card(&CardCatalog::standard(), "Tiger").pattern();
    for name in [" Tiger", "Tiger ", "\tTiger"] {
        assert!(matches!(
            Card::new(name, pattern, Player::Two),
            Err(EngineError::InvalidCard(_))
        ));
    }

    let spaced = Card::new("Red Tiger", pattern, Player::Two).unwrap();
    let parsed: Card = spaced.encode().parse().unwrap();
    assert_eq!(parsed, spaced);
}

#[test]
fn test_serde_validates() {
    let catalog = CardCatalog::standard();
    let dragon = card(&catalog, "Dragon");
    let json = serde_json::to_string(dragon).unwrap();
    let back: Card = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, dragon);

    let bad_pattern = "[[0,0,0,0,0],[0,0,1,0,0],[0,0,1,0,0],[0,0,0,0,0],[0,0,0,0,0]]";
    assert!(serde_json::from_str::<Pattern>(bad_pattern).is_err());
    let short = "[[0,0,0,0,0],[0,0,1,0,0]]";
    assert!(serde_json::from_str::<Pattern>(short).is_err());
}

#[test]
fn test_catalog_lookup_errors() {
    let catalog = CardCatalog::standard();
    assert!(matches!(catalog.resolve("Phoenix"), Err(EngineError::UnknownCard(_))));

    let mut custom = CardCatalog::new();
    let ox = card(&catalog, "Ox").clone();
    custom.register(ox.clone()).unwrap();
    assert!(matches!(custom.register(ox), Err(EngineError::DuplicateCard(_))));
    assert_eq!(custom.len(), 1);
}

#[test]
fn test_every_card_moves_from_start() {
    // On the opening board every card has at least one destination for
    // some piece: nothing in the catalog is dead weight.
    let catalog = CardCatalog::standard();
    let board = Board::new();
    for (_, card) in catalog.iter() {
        for player in Player::ALL {
            let movable = board.player_pieces(player).any(|piece| {
                card.valid_moves(piece.coord, player, BOARD_SIZE)
                    .iter()
                    .any(|to| board.piece_at(*to).map_or(true, |p| p.owner != player))
            });
            assert!(movable, "{} stuck for {player}", card.name());
        }
    }
}
