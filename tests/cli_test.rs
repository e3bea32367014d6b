use clap::Parser;
use gigfinder_client::cli::{AdminCommands, Cli, CategoryCommands, Commands, JobCommands};
use rust_decimal::Decimal;

#[test]
fn parses_job_post_with_budget() {
    let cli = Cli::try_parse_from([
        "gigfinder", "jobs", "post", "--title", "Fix tap", "--budget", "500", "--address", "Pune",
    ])
    .unwrap();

    match cli.command {
        Commands::Jobs(JobCommands::Post { title, budget, address, .. }) => {
            assert_eq!(title.as_deref(), Some("Fix tap"));
            assert_eq!(budget, Some(Decimal::from(500)));
            assert_eq!(address.as_deref(), Some("Pune"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn parses_nested_admin_category_command() {
    let cli = Cli::try_parse_from(["gigfinder", "--json", "admin", "categories", "rename", "4", "Painting"])
        .unwrap();
    assert!(cli.json);
    assert!(matches!(
        cli.command,
        Commands::Admin(AdminCommands::Categories(CategoryCommands::Rename { id: 4, ref name })) if name == "Painting"
    ));
}

#[test]
fn complete_requires_proof_phone_and_otp() {
    assert!(Cli::try_parse_from(["gigfinder", "jobs", "complete", "3", "--otp", "4321"]).is_err());
    assert!(Cli::try_parse_from([
        "gigfinder", "jobs", "complete", "3", "--proof", "done.jpg", "--phone", "7000000001", "--otp", "4321",
    ])
    .is_ok());
}
