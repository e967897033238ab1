//! CLI argument parsing and command tests.
//!
//! Parsing is exercised through `Cli::try_parse_from`; commands run
//! against files in a temporary directory.

mod clap_parsing {
    use clap::Parser;
    use qmlkit_cli::{Cli, Commands};
    use qmlkit_compile::Target;
    use qmlkit_observables::ObservableKind;
    use std::path::PathBuf;

    #[test]
    fn test_parse_observable() {
        let cli =
            Cli::try_parse_from(["qmlkit", "observable", "--kind", "pairs", "-n", "4", "--bases", "XZ", "--json"])
                .unwrap();
        match cli.command {
            Commands::Observable {
                kind,
                num_qubits,
                bases,
                seed,
                json,
            } => {
                assert_eq!(kind, ObservableKind::Pairs);
                assert_eq!(num_qubits, 4);
                assert_eq!(bases, "XZ");
                assert_eq!(seed, 0);
                assert!(json);
            }
            _ => panic!("Expected Observable command"),
        }
    }

    #[test]
    fn test_parse_observable_unknown_kind() {
        let result = Cli::try_parse_from(["qmlkit", "observable", "--kind", "triples", "-n", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_gates_with_target() {
        let cli = Cli::try_parse_from(["qmlkit", "gates", "-l", "H-Ry(x)-cx", "-n", "3", "-f", "2", "-t", "IQM20"])
            .unwrap();
        match cli.command {
            Commands::Gates {
                layers,
                num_qubits,
                num_features,
                target,
            } => {
                assert_eq!(layers, "H-Ry(x)-cx");
                assert_eq!(num_qubits, 3);
                assert_eq!(num_features, 2);
                assert_eq!(target, Some(Target::Iqm20));
            }
            _ => panic!("Expected Gates command"),
        }
    }

    #[test]
    fn test_parse_gates_unknown_target() {
        let result = Cli::try_parse_from(["qmlkit", "gates", "-l", "H", "-n", "1", "-f", "1", "-t", "ionq"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_measure_defaults() {
        let cli = Cli::try_parse_from(["qmlkit", "measure", "-l", "Ry(x)", "-n", "2", "-f", "2"]).unwrap();
        match cli.command {
            Commands::Measure {
                observable,
                bases,
                target,
                output,
                ..
            } => {
                assert_eq!(observable, ObservableKind::Pairs);
                assert_eq!(bases, "XYZ");
                assert!(target.is_none());
                assert!(output.is_none());
            }
            _ => panic!("Expected Measure command"),
        }
    }

    #[test]
    fn test_parse_sweep_requires_config() {
        assert!(Cli::try_parse_from(["qmlkit", "sweep"]).is_err());
        let cli = Cli::try_parse_from(["qmlkit", "sweep", "-c", "sweep.yaml"]).unwrap();
        match cli.command {
            Commands::Sweep { config } => assert_eq!(config, PathBuf::from("sweep.yaml")),
            _ => panic!("Expected Sweep command"),
        }
    }

    #[test]
    fn test_parse_pareto_labels() {
        let cli = Cli::try_parse_from([
            "qmlkit",
            "pareto",
            "-i",
            "records.json",
            "--x",
            "num_qubits",
            "--label",
            "bases,seed",
            "--title",
            "Two moons",
            "-o",
            "front.svg",
        ])
        .unwrap();
        match cli.command {
            Commands::Pareto { x, y, label, title, .. } => {
                assert_eq!(x, "num_qubits");
                assert_eq!(y, "score");
                assert_eq!(label, vec!["bases", "seed"]);
                assert_eq!(title, "Two moons");
            }
            _ => panic!("Expected Pareto command"),
        }
    }

    #[test]
    fn test_parse_bloch_optional_features() {
        let cli =
            Cli::try_parse_from(["qmlkit", "bloch", "-d", "data.json", "-l", "Ry(x)", "-n", "2", "-o", "b.svg"]).unwrap();
        match cli.command {
            Commands::Bloch { num_features, .. } => assert!(num_features.is_none()),
            _ => panic!("Expected Bloch command"),
        }
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = Cli::try_parse_from(["qmlkit", "version"]).unwrap();
        assert_eq!(cli.verbose, 0);
        let cli = Cli::try_parse_from(["qmlkit", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["qmlkit", "version", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["qmlkit"]).is_err());
    }
}

mod commands {
    use qmlkit_cli::commands::{bloch, gates, measure, observable, pareto, sweep};
    use qmlkit_compile::Target;
    use qmlkit_observables::ObservableKind;
    use std::fs;
    use std::path::Path;

    const DATASET: &str = r#"{
        "x": [[0.1, 0.2], [0.2, 0.1], [0.15, 0.25], [0.05, 0.1], [0.3, 0.2], [0.25, 0.05],
              [2.9, 3.0], [3.1, 2.8], [2.7, 3.2], [3.0, 2.9], [2.8, 3.1], [3.2, 2.7]],
        "y": [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]
    }"#;

    fn write_dataset(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("data.json");
        fs::write(&path, DATASET).unwrap();
        path
    }

    #[test]
    fn test_observable_and_gates_run() {
        observable::execute(ObservableKind::Neighbours, 3, "XZ", 7, false).unwrap();
        observable::execute(ObservableKind::Singles, 3, "XZ", 7, true).unwrap();
        assert!(observable::execute(ObservableKind::Singles, 3, "", 7, false).is_err());

        gates::execute("H-Ry(x)-cx", 3, 2, Some(Target::Ibm5)).unwrap();
        assert!(gates::execute("H-Foo(x)", 3, 2, None).is_err());
    }

    #[test]
    fn test_measure_writes_one_file_per_group() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("circuits");
        measure::execute("Ry(x)-cz", 2, 2, ObservableKind::Singles, "Z", 0, None, Some(&out)).unwrap();

        // Two single-Z terms and the identity commute qubit-wise: one group.
        let files: Vec<_> = fs::read_dir(&out).unwrap().collect();
        assert_eq!(files.len(), 1);
        let qasm = fs::read_to_string(out.join("measurement_0.qasm")).unwrap();
        assert!(qasm.starts_with("OPENQASM 3"));
        assert!(qasm.contains("measure"));
    }

    #[test]
    fn test_bloch_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_dataset(dir.path());
        let out = dir.path().join("plots/bloch.svg");
        bloch::execute(&data, "Ry(x)-Rz(x)", 2, None, &out).unwrap();
        let svg = fs::read_to_string(out).unwrap();
        assert!(svg.contains("<svg"));

        assert!(bloch::execute(&data, "Ry(x)", 2, Some(3), &dir.path().join("bad.svg")).is_err());
        assert!(bloch::execute(&dir.path().join("missing.json"), "Ry(x)", 2, None, &dir.path().join("x.svg")).is_err());
    }

    #[tokio::test]
    async fn test_sweep_then_pareto() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_dataset(dir.path());
        let records = dir.path().join("records.json");
        let config = dir.path().join("sweep.yaml");
        fs::write(
            &config,
            format!(
                "dataset: {}\noutput: {}\nfolds: 3\ngrid:\n  num_qubits: [1, 2]\n  num_layers: [2]\n  seeds: [0]\n  bases: [\"Z\", \"XZ\"]\n",
                data.display(),
                records.display()
            ),
        )
        .unwrap();

        sweep::execute(&config).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&records).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);

        let svg = dir.path().join("front.svg");
        let labels = vec!["bases".to_string()];
        pareto::execute(&records, "num_qubits", "score", &labels, "sweep", &svg).unwrap();
        assert!(fs::read_to_string(svg).unwrap().contains("Pareto Front"));
    }

    #[tokio::test]
    async fn test_sweep_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sweep.yaml");
        fs::write(&config, "dataset: data.json\nfolds: 1\n").unwrap();
        let err = sweep::execute(&config).await.unwrap_err();
        assert!(format!("{err:#}").contains("folds"));
    }
}
