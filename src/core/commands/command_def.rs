// src/core/commands/command_def.rs

//! The `define_commands!` macro, which expands the dispatch table in `mod.rs` into
//! the `Command` enum, name lookup, and the `CommandExt` implementation.

macro_rules! define_commands {
    ( $( ($variant:ident, $ty:ident, $module:ident) ),* $(,)? ) => {
        /// A fully parsed command, ready for execution.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Command {
            $( $variant($module::$ty), )*
        }

        impl Command {
            /// Every supported command name, without namespace.
            pub const NAMES: &'static [&'static str] = &[ $( $module::$ty::NAME, )* ];

            /// Parses the arguments of the command called `name`.
            /// Returns `Ok(None)` when no command carries that name.
            fn parse_by_name(
                name: &str,
                scanner: &mut TokenScanner,
            ) -> Result<Option<Self>, BridgeError> {
                $(
                    if name.eq_ignore_ascii_case($module::$ty::NAME) {
                        let parsed = <$module::$ty as ParseCommand>::parse(scanner)?;
                        return Ok(Some(Command::$variant(parsed)));
                    }
                )*
                Ok(None)
            }

            /// Returns the metadata of the wrapped command.
            pub fn spec(&self) -> &dyn CommandSpec {
                match self {
                    $( Command::$variant(cmd) => cmd as &dyn CommandSpec, )*
                }
            }
        }

        impl CommandExt for Command {
            fn get_flags(&self) -> CommandFlags {
                self.spec().flags()
            }

            fn execute(&self, ctx: &BackendContext) -> Result<ReplyFrame, BridgeError> {
                match self {
                    $( Command::$variant(cmd) => cmd.execute(ctx), )*
                }
            }
        }
    };
}
