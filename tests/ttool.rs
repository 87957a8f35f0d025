mod normalize {
    use ttool::normalize::Normalizer;

    #[test]
    fn university_key() {
        let normalizer = Normalizer::default();
        for (input, expected) in [
            ("Acme Üniversitesi (İstanbul)", "ACME ÜNİVERSİTESİ"),
            ("ACME   ÜNİVERSİTESİ", "ACME ÜNİVERSİTESİ"),
            // mixed-case input folds to the same key as the canonical spelling
            ("Acme Üniversitesi", "ACME ÜNİVERSİTESİ"),
            ("Beta Universitesi", "BETA ÜNİVERSİTESİ"),
            ("BETA UNIVERSITESI", "BETA ÜNİVERSİTESİ"),
            ("", ""),
        ] {
            assert_eq!(normalizer.university_key(input), expected, "for {input:?}");
        }
    }

    #[test]
    fn program_key_strips_track_and_fee_annotations() {
        let normalizer = Normalizer::default();
        for (input, expected) in [
            ("HUKUK (İNGİLİZCE) (ÜCRETLİ)", "HUKUK"),
            ("HUKUK (%50 İNDİRİMLİ)", "HUKUK"),
            ("HUKUK (BURSLU)", "HUKUK"),
            ("HUKUK BURSLU", "HUKUK"),
            ("FİZYOTERAPİ (4 YILLIK) ÜCRETLİ", "FİZYOTERAPİ"),
            ("TIP (TÜRKÇE)", "TIP"),
            // mixed-case annotations are stripped the same as uppercase ones
            ("Hukuk (İngilizce)", "HUKUK"),
            ("Hukuk (%50 İndirimli)", "HUKUK"),
            ("Fizyoterapi (4 Yıllık) Burslu", "FİZYOTERAPİ"),
            ("Tıp", "TIP"),
            ("", ""),
        ] {
            assert_eq!(normalizer.program_key(input), expected, "for {input:?}");
        }
    }

    #[test]
    fn keys_are_idempotent() {
        let normalizer = Normalizer::default();
        for input in [
            "Acme Üniversitesi (İstanbul)",
            "Beta Universitesi",
            "HUKUK (İNGİLİZCE) (ÜCRETLİ)",
            "Hukuk (İngilizce)",
            "FİZYOTERAPİ (4 YILLIK) BURSLU",
            "",
        ] {
            let uni = normalizer.university_key(input);
            assert_eq!(normalizer.university_key(&uni), uni, "for {input:?}");
            let prog = normalizer.program_key(input);
            assert_eq!(normalizer.program_key(&prog), prog, "for {input:?}");
        }
    }

    #[test]
    fn english_track_detection() {
        let normalizer = Normalizer::default();
        for (name, detail, expected) in [
            ("Tıp (ing)", "", true),
            ("TIP (ING)", "", true),
            ("TIP (İNGİLİZCE)", "", true),
            ("Tıp", "ogretim dili ingilizce", true),
            ("Tıp", "Öğretim Dili İngilizce", true),
            ("Tıp", "", false),
            ("Hukuk (Ücretli)", "", false),
            // empty program names never classify
            ("", "ingilizce", false),
        ] {
            assert_eq!(
                normalizer.is_english_track(name, detail),
                expected,
                "for {name:?} / {detail:?}"
            );
        }
    }
}

mod rules {
    use ttool::rules::Rules;

    #[test]
    fn serde() {
        let rules = Rules::default();
        let data =
            ron::ser::to_string_pretty(&rules, ron::ser::PrettyConfig::new().struct_names(true))
                .unwrap();
        assert_eq!(
            ron::from_str::<Rules>(&data).unwrap(),
            rules,
            "round-trip works"
        );
    }
}

mod scholarship {
    use ttool::scholarship::scholarship_pct;

    #[test]
    fn label_precedence() {
        for (label, expected) in [
            ("Burslu", 100),
            ("Tam Burslu", 100),
            ("%100 İndirimli", 100),
            ("%75 İndirimli", 75),
            ("%50 İndirimli", 50),
            ("Yarım Burslu", 50),
            ("%25 İndirimli", 25),
            ("Ücretli", 0),
            ("UCRETLI", 0),
            ("Ücretsiz", 100),
            ("ucretsiz", 100),
            ("ÜCRETSİZ", 100),
            ("", 0),
            ("deneme", 0),
            // labels with several digit substrings resolve to the first match
            ("750", 75),
            ("%75 yerine %50", 75),
            ("%25 (eski %50)", 50),
        ] {
            assert_eq!(scholarship_pct(label), expected, "for {label:?}");
        }
    }
}

mod lookup {
    use ttool::lookup::{PriceBook, PriceKey, YearPrices};
    use ttool::normalize::Normalizer;

    fn book(csv: &str) -> PriceBook {
        PriceBook::from_reader(csv.as_bytes(), &Normalizer::default()).unwrap()
    }

    #[test]
    fn later_rows_overwrite_per_year() {
        let book = book(
            "original_university,original_department,original_price_2025,price_2024_TL\n\
             Acme Üniversitesi,Hukuk,\"₺550,000.00\",450.000₺\n\
             Acme Üniversitesi,Hukuk,,475.000₺\n",
        );
        assert_eq!(book.rows_read, 2);
        assert_eq!(book.len(), 1);
        assert_eq!(
            book.get(&PriceKey {
                university: "ACME ÜNİVERSİTESİ".into(),
                program: "HUKUK".into(),
                english: false,
            }),
            Some(&YearPrices {
                y2024: Some(475000.0),
                y2025: Some(550000.0),
            }),
            "the second row replaces 2024 but must not erase the 2025 value"
        );
    }

    #[test]
    fn rows_without_any_price_are_dropped() {
        let book = book(
            "original_university,original_department,original_price_2025,price_2024_TL\n\
             Acme Üniversitesi,Hukuk,abc,\n",
        );
        assert_eq!(book.rows_read, 1);
        assert!(book.is_empty());
    }

    #[test]
    fn resolve_falls_back_across_tracks() {
        let book = book(
            "original_university,original_department,original_price_2025,price_2024_TL\n\
             Acme Üniversitesi,Tıp (ing),1.127.500₺,\n\
             Acme Üniversitesi,Hukuk,455.000₺,\n",
        );
        // exact track
        let tip = book.resolve("ACME ÜNİVERSİTESİ", "TIP (İNG)", true).unwrap();
        assert_eq!(tip.y2025, Some(1127500.0));
        // the roster says local-language track, the collection says English:
        // the track-forced-true pass still finds it
        let tip = book.resolve("ACME ÜNİVERSİTESİ", "TIP (İNG)", false).unwrap();
        assert_eq!(tip.y2025, Some(1127500.0));
        // an English roster entry matches a collection row with no track marker
        let hukuk = book.resolve("ACME ÜNİVERSİTESİ", "HUKUK", true).unwrap();
        assert_eq!(hukuk.y2025, Some(455000.0));
        assert!(book.resolve("ACME ÜNİVERSİTESİ", "FELSEFE", false).is_none());
    }
}

mod reconcile {
    use ttool::reconcile::Options;

    fn fixture(name: &str) -> Vec<u8> {
        std::fs::read(std::path::Path::new("tests").join("fixtures").join(name)).unwrap()
    }

    #[test]
    fn end_to_end() {
        let masters = vec![
            std::io::Cursor::new(fixture("master-2024.csv")),
            std::io::Cursor::new(fixture("master-2025.csv")),
        ];
        let prices = std::io::Cursor::new(fixture("prices.csv"));
        let mut out = Vec::<u8>::new();
        let outcome =
            ttool::reconcile(masters, prices, &mut out, Options::default()).unwrap();

        assert_eq!(outcome.master_rows, 8);
        assert_eq!(outcome.price_rows, 6);
        assert_eq!(outcome.price_keys, 4);
        assert_eq!(outcome.matched, 5);
        assert_eq!(outcome.unmatched, 1, "FELSEFE has no collected price");
        assert_eq!(outcome.duplicate_variants, 1, "101110001 repeats in 2025");
        assert_eq!(outcome.public_skipped, 1);
        assert_eq!(
            outcome.scholarship_distribution.into_iter().collect::<Vec<_>>(),
            vec![(0, 3), (50, 1), (100, 1)]
        );

        let mut csv = csv::Reader::from_reader(out.as_slice());
        assert_eq!(
            csv.headers().unwrap(),
            &csv::StringRecord::from(ttool::reconcile::OUTPUT_HEADERS.to_vec())
        );
        let rows: Vec<csv::StringRecord> =
            csv.records().collect::<Result<_, _>>().unwrap();
        let expected: &[&[&str]] = &[
            // full-fee variant carries the base price unchanged; the second price
            // row replaced the 2024 value
            &[
                "101110001.0",
                "ACME ÜNİVERSİTESİ",
                "HUKUK (ÜCRETLİ)",
                "false",
                "0",
                "475000.0",
                "550000.0",
                "475000.0",
                "550000.0",
            ],
            // full scholarship discounts to zero, the base price stays visible
            &[
                "101110002.0",
                "ACME ÜNİVERSİTESİ",
                "HUKUK (BURSLU)",
                "false",
                "100",
                "475000.0",
                "550000.0",
                "0.0",
                "0.0",
            ],
            &[
                "101110003.0",
                "ACME ÜNİVERSİTESİ",
                "HUKUK (%50 İNDİRİMLİ)",
                "false",
                "50",
                "475000.0",
                "550000.0",
                "237500.0",
                "275000.0",
            ],
            // English roster entry, matched through the no-track fallback; the
            // absent 2024 price stays absent, it never becomes zero
            &[
                "101110004.0",
                "ACME ÜNİVERSİTESİ",
                "TIP (İNGİLİZCE) (ÜCRETLİ)",
                "true",
                "0",
                "",
                "1127500.0",
                "",
                "1127500.0",
            ],
            // "sadece tam burslu" parses to a genuine zero price
            &[
                "201110001.0",
                "BETA UNIVERSITESI",
                "MİMARLIK (ÜCRETLİ)",
                "false",
                "0",
                "",
                "0.0",
                "",
                "0.0",
            ],
        ];
        assert_eq!(rows.len(), expected.len());
        for (row, expected) in rows.iter().zip(expected) {
            assert_eq!(row, &csv::StringRecord::from(expected.to_vec()), "{row:?}");
        }
    }

    #[test]
    fn missing_roster_column_is_an_error() {
        let masters = vec![std::io::Cursor::new(
            b"university,program\nAcme,Hukuk\n".to_vec(),
        )];
        let prices = std::io::Cursor::new(fixture("prices.csv"));
        let err = ttool::reconcile(masters, prices, Vec::new(), Options::default()).unwrap_err();
        assert!(err.to_string().contains("yop_kodu"), "{err}");
    }
}

#[test]
fn parse_price() {
    for (input, expected) in [
        ("₺450,000.00", Some(450000.0)),
        ("455.000₺", Some(455000.0)),
        ("1.127.500₺", Some(1127500.0)),
        ("455.00", Some(455.0)),
        ("450,000", Some(450000.0)),
        ("120000", Some(120000.0)),
        ("₺ 1,127,500.00", Some(1127500.0)),
        ("Sadece Tam Burslu öğrenci alınır", Some(0.0)),
        ("yalnızca tam burs", Some(0.0)),
        ("", None),
        ("   ", None),
        ("not a number", None),
    ] {
        assert_eq!(ttool::parse_price(input), expected, "for {input:?}");
    }
}
