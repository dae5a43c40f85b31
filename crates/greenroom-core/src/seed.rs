//! The fixed guest list every session starts from.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::guest::{
  ContactChannels, Guest, GuestId, Passage, Sector, Status,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(year: i32, month: u32, d: u32) -> DateTime<Utc> {
  day(year, month, d).and_time(NaiveTime::MIN).and_utc()
}

fn passage(
  id: &str,
  date: NaiveDate,
  program: &str,
  topic: &str,
  duration_minutes: u32,
) -> Passage {
  Passage {
    id: id.into(),
    date,
    program: program.into(),
    topic: topic.into(),
    duration_minutes,
    note: None,
  }
}

fn sectors<const N: usize>(list: [Sector; N]) -> BTreeSet<Sector> {
  list.into_iter().collect()
}

/// The five guests the newsroom tracker ships with.
pub fn seed_guests() -> Vec<Guest> {
  vec![
    Guest {
      id:               GuestId::new("1"),
      surname:          "Dupont".into(),
      given_name:       "Marie".into(),
      status:           Status::Active,
      sectors:          sectors([Sector::Politics, Sector::Society]),
      organization:     "Institut Politique Paris".into(),
      role:             "Research Director".into(),
      bio:              "Public policy specialist with 15 years of experience in \
                         political analysis."
        .into(),
      notes:            "Excellent speaker, available in the mornings".into(),
      contact:          ContactChannels {
        linkedin: Some("https://linkedin.com/in/mariedupont".into()),
        social:   Some("@mariedupont".into()),
        website:  None,
        email:    Some("marie.dupont@ipp.fr".into()),
        phone:    Some("01 23 45 67 89".into()),
      },
      passages:         vec![
        Passage {
          note: Some("Very good appearance".into()),
          ..passage("p1", day(2024, 11, 15), "Le Grand Matin", "Pension reform", 15)
        },
        passage("p2", day(2024, 10, 20), "Le Débat", "European elections", 30),
        passage("p3", day(2024, 9, 10), "Le Grand Matin", "2025 budget", 20),
      ],
      created_at:       midnight(2024, 1, 15),
      updated_at:       midnight(2024, 11, 15),
      created_by:       "admin@radio.fr".into(),
      last_modified_by: "journaliste@radio.fr".into(),
    },
    Guest {
      id:               GuestId::new("2"),
      surname:          "Martin".into(),
      given_name:       "Jacques".into(),
      status:           Status::Active,
      sectors:          sectors([Sector::Economy, Sector::Tech]),
      organization:     "Banque Centrale".into(),
      role:             "Chief Economist".into(),
      bio:              "Expert in the digital economy and monetary policy.".into(),
      notes:            "Prefers interviews late in the day".into(),
      contact:          ContactChannels {
        linkedin: Some("https://linkedin.com/in/jacquesmartin".into()),
        email: Some("j.martin@bc.fr".into()),
        ..ContactChannels::default()
      },
      passages:         vec![
        passage("p4", day(2024, 11, 25), "Économie Matin", "Inflation and interest rates", 25),
        passage("p5", day(2024, 11, 10), "Le Grand Matin", "Cryptocurrencies", 15),
      ],
      created_at:       midnight(2024, 2, 20),
      updated_at:       midnight(2024, 11, 25),
      created_by:       "admin@radio.fr".into(),
      last_modified_by: "chef@radio.fr".into(),
    },
    Guest {
      id:               GuestId::new("3"),
      surname:          "Bernard".into(),
      given_name:       "Sophie".into(),
      status:           Status::Active,
      sectors:          sectors([Sector::Culture, Sector::Society]),
      organization:     "Musée des Arts".into(),
      role:             "Curator".into(),
      bio:              "Art historian specialising in contemporary art.".into(),
      notes:            "Very good at explaining things simply".into(),
      contact:          ContactChannels {
        website: Some("https://sophiebernard.fr".into()),
        email: Some("s.bernard@musee.fr".into()),
        ..ContactChannels::default()
      },
      passages:         vec![passage(
        "p6",
        day(2024, 12, 1),
        "Culture Midi",
        "Picasso exhibition",
        20,
      )],
      created_at:       midnight(2024, 3, 10),
      updated_at:       midnight(2024, 12, 1),
      created_by:       "journaliste@radio.fr".into(),
      last_modified_by: "journaliste@radio.fr".into(),
    },
    Guest {
      id:               GuestId::new("4"),
      surname:          "Rousseau".into(),
      given_name:       "Pierre".into(),
      status:           Status::Active,
      sectors:          sectors([Sector::Geopolitics]),
      organization:     "Think Tank International".into(),
      role:             "Senior Analyst".into(),
      bio:              "Specialist in the Middle East and international relations."
        .into(),
      notes:            "Well connected, quick to react to breaking news".into(),
      contact:          ContactChannels {
        linkedin: Some("https://linkedin.com/in/pierrerousseau".into()),
        phone: Some("01 98 76 54 32".into()),
        ..ContactChannels::default()
      },
      passages:         vec![
        passage("p7", day(2024, 11, 28), "Le Débat", "Conflict in the Middle East", 35),
        passage("p8", day(2024, 10, 15), "Le Grand Matin", "G20 summit", 15),
      ],
      created_at:       midnight(2024, 1, 5),
      updated_at:       midnight(2024, 11, 28),
      created_by:       "admin@radio.fr".into(),
      last_modified_by: "chef@radio.fr".into(),
    },
    Guest {
      id:               GuestId::new("5"),
      surname:          "Lefebvre".into(),
      given_name:       "Thomas".into(),
      status:           Status::Active,
      sectors:          sectors([Sector::Sport]),
      organization:     "Fédération Française de Football".into(),
      role:             "Sports Consultant".into(),
      bio:              "Former professional player, now a sports consultant.".into(),
      notes:            "Very busy schedule, book two weeks ahead".into(),
      contact:          ContactChannels {
        social: Some("@thomaslefebvre".into()),
        ..ContactChannels::default()
      },
      passages:         vec![passage(
        "p9",
        day(2024, 12, 5),
        "Sport Soir",
        "World Cup",
        20,
      )],
      created_at:       midnight(2024, 4, 12),
      updated_at:       midnight(2024, 12, 5),
      created_by:       "journaliste@radio.fr".into(),
      last_modified_by: "journaliste@radio.fr".into(),
    },
  ]
}
