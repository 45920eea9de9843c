use crate::application::session::Session;
use crate::domain::account::{Account, Amount, Balance};
use crate::domain::ports::LedgerStore;
use crate::error::{LedgerError, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// The interactive menu shell: one login, one session, one account.
///
/// Generic over its input and output streams so sessions can be scripted
/// in tests. All user errors (unparseable choices, bad amounts, failed
/// store operations) are rendered and the relevant loop continues; the
/// shell only gives up when its own streams fail. End of input ends the
/// session cleanly at any prompt.
pub struct Shell<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Drives a full session: create-or-login until an account is
    /// obtained, then the post-login menu until exit.
    pub async fn run(&mut self, store: &dyn LedgerStore) -> Result<()> {
        writeln!(self.output, "Welcome to Bankline!")?;
        writeln!(self.output)?;

        let Some(account) = self.obtain_account(store).await? else {
            return Ok(());
        };
        self.menu_loop(Session::new(account, store)).await
    }

    async fn obtain_account(&mut self, store: &dyn LedgerStore) -> Result<Option<Account>> {
        loop {
            writeln!(self.output, "Do you want to:")?;
            writeln!(self.output, "1. Create a New Account")?;
            writeln!(self.output, "2. Log In")?;
            let Some(choice) = self.prompt_line("Enter your choice: ")? else {
                return Ok(None);
            };

            match choice.parse::<u32>() {
                Ok(1) => {
                    let Some(name) = self.prompt_line("Enter your name: ")? else {
                        return Ok(None);
                    };
                    let Some(surname) = self.prompt_line("Enter your surname: ")? else {
                        return Ok(None);
                    };
                    match store.create(&name, &surname).await {
                        Ok(account) => {
                            writeln!(self.output)?;
                            writeln!(self.output, "{}", "Account created successfully!".green())?;
                            writeln!(self.output, "Your account number is: {}", account.number)?;
                            return Ok(Some(account));
                        }
                        Err(e) => self.render_error(&e)?,
                    }
                }
                Ok(2) => {
                    let Some(number) = self.prompt_line("Enter your account number: ")? else {
                        return Ok(None);
                    };
                    match store.find_by_account_number(&number).await {
                        Ok(Some(account)) => {
                            let greeting =
                                format!("Login successful! Welcome {} {}", account.name, account.surname);
                            writeln!(self.output, "{}", greeting.as_str().green())?;
                            return Ok(Some(account));
                        }
                        Ok(None) => {
                            writeln!(self.output, "{}", "Account number not found! Try again.".red())?;
                        }
                        Err(e) => self.render_error(&e)?,
                    }
                }
                Ok(_) => writeln!(self.output, "Invalid choice! Try again.")?,
                Err(_) => writeln!(self.output, "Error: Invalid input. Try again.")?,
            }
            writeln!(self.output)?;
        }
    }

    async fn menu_loop(&mut self, mut session: Session<'_>) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "What would you like to do?")?;
            writeln!(self.output, "1. Deposit")?;
            writeln!(self.output, "2. Withdraw")?;
            writeln!(self.output, "3. Check Balance")?;
            writeln!(self.output, "4. Show Transaction History")?;
            writeln!(self.output, "5. Exit")?;
            let Some(choice) = self.prompt_line("Enter your choice: ")? else {
                return Ok(());
            };

            match choice.parse::<u32>() {
                Ok(1) => {
                    let Some(raw) = self.prompt_line("Enter amount to deposit: ")? else {
                        return Ok(());
                    };
                    match parse_amount(&raw) {
                        Ok(amount) => match session.deposit(amount).await {
                            Ok(_) => {
                                writeln!(self.output, "{}", format!("Deposited R{}", amount).as_str().green())?;
                            }
                            Err(e) => self.render_error(&e)?,
                        },
                        Err(e) => self.render_error(&e)?,
                    }
                }
                Ok(2) => {
                    let Some(raw) = self.prompt_line("Enter amount to withdraw: ")? else {
                        return Ok(());
                    };
                    match parse_amount(&raw) {
                        Ok(amount) if Balance::from(amount) > session.balance() => {
                            let message =
                                format!("Insufficient balance! You only have R{}", session.balance());
                            writeln!(self.output, "{}", message.as_str().red())?;
                        }
                        Ok(amount) => match session.withdraw(amount).await {
                            Ok(_) => {
                                writeln!(self.output, "{}", format!("Withdrew R{}", amount).as_str().green())?;
                            }
                            Err(e) => self.render_error(&e)?,
                        },
                        Err(e) => self.render_error(&e)?,
                    }
                }
                Ok(3) => writeln!(self.output, "Current balance: R{}", session.balance())?,
                Ok(4) => self.show_history(&session)?,
                Ok(5) => {
                    writeln!(self.output, "Thank you for using Bankline!")?;
                    return Ok(());
                }
                Ok(_) => writeln!(self.output, "Invalid choice. Try again.")?,
                Err(_) => {
                    writeln!(self.output, "Error: Invalid input. Please enter numbers only.")?;
                }
            }
        }
    }

    fn show_history(&mut self, session: &Session<'_>) -> Result<()> {
        if session.transactions().is_empty() {
            writeln!(self.output, "No transactions yet.")?;
            return Ok(());
        }
        writeln!(self.output, "--- Transaction History ---")?;
        for entry in session.transactions() {
            writeln!(self.output, "{}", entry)?;
        }
        writeln!(self.output, "---------------------------")?;
        Ok(())
    }

    fn render_error(&mut self, error: &LedgerError) -> Result<()> {
        // User mistakes read better without the error-variant prefix.
        let message = match error {
            LedgerError::ValidationError(reason) => format!("Error: {}", reason),
            other => format!("Error: {}", other),
        };
        writeln!(self.output, "{}", message.as_str().red())?;
        Ok(())
    }

    /// Prints the prompt and reads one trimmed line; `None` on end of input.
    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

fn parse_amount(raw: &str) -> Result<Amount> {
    let value: Decimal = raw.parse().map_err(|_| {
        LedgerError::ValidationError("Invalid input. Please enter numbers only.".to_string())
    })?;
    Amount::new(value)
}
