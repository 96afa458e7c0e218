use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Args)]
pub struct SessionOpt {
    /// Usuário do painel
    #[arg(short, long = "user", env = "PAINEL_USER")]
    pub username: Option<String>,
    /// Senha do painel
    #[arg(short, long = "pass", env = "PAINEL_PASS", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Parser)]
#[command(name = "painel", version, about = "Cliente de terminal do painel INFLUENCIANDO")]
pub struct PainelOpt {
    /// Base da API, ex. `https://painel.example/api`
    #[arg(long = "api-url", env = "PAINEL_API_URL")]
    pub api_url: Option<String>,
    /// Logs de depuração
    #[arg(short, long, action)]
    pub verbose: bool,
    #[command(flatten)]
    pub session: SessionOpt,
    #[command(subcommand)]
    pub command: PainelCommand,
}

#[derive(Debug, Subcommand)]
pub enum PainelCommand {
    /// Verifica se a API está no ar
    #[command(name = "health")]
    Health,
    /// Cria uma conta nova
    #[command(name = "register")]
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Resumo dos pedidos e saldo
    #[command(name = "dashboard")]
    Dashboard,
    /// Catálogo de serviços
    #[command(name = "services")]
    Services {
        /// Busca no nome ou na descrição
        #[arg(short, long, default_value = "")]
        search: String,
        /// Categoria exata, ex. `Instagram`
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Lista os pedidos
    #[command(name = "orders")]
    Orders {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Cria um pedido
    #[command(name = "order")]
    Order {
        #[arg(long = "service-id")]
        service_id: i64,
        #[arg(long)]
        link: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Atualiza o status de um pedido no provedor
    #[command(name = "refresh-order")]
    RefreshOrder { order_id: i64 },
    /// Sincroniza o status de todos os pedidos pendentes
    #[command(name = "sync-orders")]
    SyncOrders,
    /// Histórico de pagamentos
    #[command(name = "payments")]
    Payments,
    /// Adiciona saldo via PIX e aguarda a aprovação (Ctrl-C fecha o modal)
    #[command(name = "pay")]
    Pay {
        /// Valor em reais, ex. `10,50`
        amount: String,
        /// Salva o QR Code PIX neste arquivo PNG
        #[arg(long = "qr-out", value_parser)]
        qr_out: Option<PathBuf>,
    },
    /// Consulta o status de um pagamento
    #[command(name = "check-payment")]
    CheckPayment { payment_id: i64 },
    /// Mostra ou altera o perfil
    #[command(name = "profile")]
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Área administrativa
    #[command(name = "admin", subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Mostra as configurações
    #[command(name = "config")]
    Config,
    /// Altera uma configuração (valor vazio apaga)
    #[command(name = "set-config")]
    SetConfig { key: String, value: String },
    /// Testa a conexão com a BaratoSocial
    #[command(name = "test-barato")]
    TestBarato,
    /// Testa a conexão com o Mercado Pago
    #[command(name = "test-mercado-pago")]
    TestMercadoPago,
    /// Lista os usuários
    #[command(name = "users")]
    Users,
    /// Estatísticas gerais
    #[command(name = "stats")]
    Stats,
    /// Pagamentos de todos os usuários
    #[command(name = "payments")]
    Payments {
        #[arg(long)]
        page: Option<u32>,
        /// Filtra por status, ex. `pending`
        #[arg(long)]
        status: Option<String>,
    },
    /// Aprova um pagamento pendente
    #[command(name = "approve")]
    Approve { payment_id: i64 },
    /// Rejeita um pagamento pendente
    #[command(name = "reject")]
    Reject { payment_id: i64 },
    /// Importa os serviços da BaratoSocial
    #[command(name = "sync-services")]
    SyncServices,
}
