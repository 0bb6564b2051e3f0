pub fn handle() -> String {
    let mut out = String::new();
    out.push_str("<strong>chainbot</strong>\n\n");
    out.push_str(
        "A bot that answers questions about a Cosmos-SDK chain: wallets, \
         validators, governance proposals, block times and exchange rates. \
         Check /help for the command list.\n\n",
    );
    out.push_str(
        "It talks to a single configured node over its RPC and REST \
         endpoints and keeps no state of its own.\n",
    );
    out
}
