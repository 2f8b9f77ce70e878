use bvb_registration::error::AppError;
use bvb_registration::registrations::{
    LookupView, RegistrationDesk, RegistrationReceipt, VerificationView,
};
use clap::Args;

use crate::infra::{prompt_optional, Console, DraftArgs};
use crate::render::{print_lookup, print_receipt, print_verification};

#[derive(Args, Debug, Default)]
pub(crate) struct LookupArgs {
    /// KEN to search for; prompted when omitted
    #[arg(long)]
    pub(crate) ken: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct VerifyArgs {
    #[arg(long)]
    pub(crate) registration_number: Option<String>,
    #[arg(long)]
    pub(crate) contact_number: Option<String>,
    /// Look the registration number up by KEN first
    #[arg(long, conflicts_with = "registration_number")]
    pub(crate) ken: Option<String>,
}

pub(crate) async fn run_register(console: &Console, args: DraftArgs) -> Result<(), AppError> {
    let draft = args.collect()?;
    let mut desk = RegistrationDesk::new(console.gateway.clone());
    let record = desk.register(draft).await?;
    print_receipt(&RegistrationReceipt::from(&record));
    Ok(())
}

pub(crate) async fn run_lookup(console: &Console, args: LookupArgs) -> Result<(), AppError> {
    let ken = match args.ken {
        Some(ken) => ken,
        None => prompt_optional("KEN")?,
    };
    let mut desk = RegistrationDesk::new(console.gateway.clone());
    let record = desk.lookup(&ken).await?;
    print_lookup(&LookupView::from(&record));
    Ok(())
}

pub(crate) async fn run_verify(console: &Console, args: VerifyArgs) -> Result<(), AppError> {
    let mut desk = RegistrationDesk::new(console.gateway.clone());

    if let Some(ken) = &args.ken {
        let record = desk.lookup(ken).await?;
        print_lookup(&LookupView::from(&record));
    }

    let registration_number = match args
        .registration_number
        .or_else(|| desk.verification_prefill().map(str::to_string))
    {
        Some(number) => number,
        None => prompt_optional("Registration number")?,
    };
    let contact_number = match args.contact_number {
        Some(number) => number,
        None => prompt_optional("Contact number")?,
    };

    let record = desk.verify(&registration_number, &contact_number).await?;
    // verify() only succeeds when the verified number is present.
    if let Some(view) = VerificationView::from_record(&record) {
        print_verification(&view);
    }
    Ok(())
}
