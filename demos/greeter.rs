use bindarg::{
    enumeration, ApplicationBuilder, Command, CommandBuilder, EnvironmentVariables, NamedOption,
    Outcome, Parameter, Scalar, Sequence,
};

#[derive(Debug, Default, Clone, PartialEq)]
enum Tone {
    #[default]
    Plain,
    Cheerful,
    Formal,
}

enumeration!(Tone {
    Plain,
    Cheerful,
    Formal,
});

#[derive(Debug, Default)]
struct Greet {
    names: Vec<String>,
    times: u8,
    tone: Tone,
}

impl Command for Greet {
    fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
        let names = Sequence::new(|greet: &mut Greet, names| greet.names = names);
        let in_range = |times: &u8| {
            if (1..=5).contains(times) {
                Ok(())
            } else {
                Err("must be between 1 and 5".to_string())
            }
        };
        let times = Scalar::new(|greet: &mut Greet, times| greet.times = times).validate(in_range);
        let tone = Scalar::new(|greet: &mut Greet, tone| greet.tone = tone);

        builder
            .name("greet")
            .description("Greet everyone by name.")
            .parameter(Parameter::new(0, "names", names).description("The names to greet."))
            .option(
                NamedOption::new("times", Some('t'), times)
                    .env("GREETER_TIMES")
                    .required()
                    .description("How many times to greet."),
            )
            .option(NamedOption::new("tone", None, tone).description("The tone of the greeting."))
    }
}

#[derive(Debug, Default)]
struct Wave {
    hand: Option<String>,
}

impl Command for Wave {
    fn declare(builder: CommandBuilder<Self>) -> CommandBuilder<Self> {
        let hand = Scalar::new(|wave: &mut Wave, hand| wave.hand = hand);
        builder
            .description("Wave, when no command is given.")
            .option(NamedOption::new("hand", None, hand))
    }
}

enum Greeter {
    Greet(Greet),
    Wave(Wave),
}

impl From<Greet> for Greeter {
    fn from(value: Greet) -> Self {
        Greeter::Greet(value)
    }
}

impl From<Wave> for Greeter {
    fn from(value: Wave) -> Self {
        Greeter::Wave(value)
    }
}

fn main() {
    let application = match ApplicationBuilder::<Greeter>::default()
        .title("greeter")
        .version("0.3.0")
        .command::<Wave>()
        .command::<Greet>()
        .build()
    {
        Ok(application) => application,
        Err(error) => {
            eprintln!("Schema error: {error}");
            std::process::exit(1);
        }
    };
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    match application.run(&tokens, &EnvironmentVariables::from_process()) {
        Ok(Outcome::Command(Greeter::Greet(greet))) => {
            let greeting = match greet.tone {
                Tone::Plain => "Hello",
                Tone::Cheerful => "Hi there",
                Tone::Formal => "Good day",
            };

            for _ in 0..greet.times {
                for name in &greet.names {
                    println!("{greeting}, {name}!");
                }
            }
        }
        Ok(Outcome::Command(Greeter::Wave(wave))) => {
            println!("*waves {} hand*", wave.hand.as_deref().unwrap_or("a"));
        }
        Ok(Outcome::Help(command)) => {
            println!("{}", command.description().unwrap_or_default());

            for parameter in command.parameters() {
                println!("  {} ({})", parameter.name(), parameter.kind());
            }

            for option in command.options() {
                println!("  {} ({})", option.identifier(), option.kind());
            }
        }
        Ok(Outcome::Version(version)) => println!("greeter {version}"),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}
